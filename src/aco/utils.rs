use super::problem::Matrix;

/// Length of the closed tour, including the edge back to the first node.
pub fn tour_length(path: &[usize], distances: &Matrix) -> f64 {
    let closing = match (path.first(), path.last()) {
        (Some(&first), Some(&last)) => distances[last][first],
        _ => 0.0,
    };

    path.iter()
        .zip(path.iter().skip(1))
        .fold(closing, |a, (&i, &j)| a + distances[i][j])
}

/// Renders a tour as `0 -> 3 -> 1 -> 0`.
pub fn format_tour(path: &[usize]) -> String {
    let mut nodes: Vec<String> = path.iter().map(usize::to_string).collect();
    if let Some(&first) = path.first() {
        nodes.push(first.to_string());
    }
    nodes.join(" -> ")
}

/// Lists the pheromone on every undirected edge `{i, j}`, `i < j`.
pub fn format_edges(pheromones: &Matrix) -> String {
    let n = pheromones.size();
    let mut lines = Vec::new();
    for i in 0..n {
        for j in i + 1..n {
            lines.push(format!("{:>3} - {:<3} {:10.3}", i, j, pheromones[i][j]));
        }
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{format_edges, format_tour, tour_length};
    use crate::aco::problem::Problem;

    #[test]
    fn perimeter_length_includes_closing_edge() {
        let problem = Problem::sample().unwrap();
        let path: Vec<usize> = (0..8).collect();
        assert_eq!(tour_length(&path, problem.distances()), 20.0);
        assert_eq!(tour_length(&[], problem.distances()), 0.0);
    }

    #[test]
    fn formats_closed_tour() {
        assert_eq!(format_tour(&[0, 2, 1]), "0 -> 2 -> 1 -> 0");
        assert_eq!(format_tour(&[]), "");
    }

    #[test]
    fn edge_listing_covers_upper_triangle() {
        let problem = Problem::sample().unwrap();
        let listing = format_edges(problem.distances());
        assert_eq!(listing.lines().count(), 28);
        assert_eq!(listing.lines().next().unwrap(), "  0 - 1        3.000");
    }
}
