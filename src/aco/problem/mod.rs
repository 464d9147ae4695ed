use std::io::{Read, Write};

use anyhow::{anyhow, bail, ensure, Result};
use regex::Regex;

pub use matrix::Matrix;

mod matrix;

pub type NomResult<I, O> = nom::IResult<I, O, nom::error::VerboseError<I>>;

/// Rectangle perimeter used when no input is supplied.
pub const SAMPLE_PLACES: [(f64, f64); 8] = [
    (0.0, 0.0),
    (0.0, 3.0),
    (0.0, 5.0),
    (3.0, 5.0),
    (5.0, 5.0),
    (5.0, 3.0),
    (5.0, 0.0),
    (3.0, 0.0),
];

/// A fully-connected symmetric TSP instance.
///
/// Construction validates the distance matrix once; afterwards the solver
/// reads it without further checks and never mutates it.
#[derive(Debug, Clone)]
pub struct Problem {
    distances: Matrix,
}

impl Problem {
    pub fn new(distances: Matrix) -> Result<Self> {
        Self::validate(&distances)?;
        Ok(Self { distances })
    }

    fn validate(distances: &Matrix) -> Result<()> {
        let n = distances.size();
        ensure!(n >= 3, "need at least 3 nodes, got {}", n);

        for i in 0..n {
            ensure!(
                distances[i][i] == 0.0,
                "distance from node {} to itself is {}, expected 0",
                i,
                distances[i][i]
            );
            for j in 0..n {
                let d = distances[i][j];
                ensure!(d.is_finite(), "distance [{}][{}] is not finite", i, j);
                ensure!(d >= 0.0, "distance [{}][{}] is negative: {}", i, j, d);
                ensure!(
                    i == j || d > 0.0,
                    "nodes {} and {} coincide (distance 0)",
                    i,
                    j
                );
                ensure!(
                    d == distances[j][i],
                    "distance [{}][{}] = {} differs from [{}][{}] = {}",
                    i,
                    j,
                    d,
                    j,
                    i,
                    distances[j][i]
                );
            }
        }

        Ok(())
    }

    pub fn from_coordinates(coordinates: &[Coordinate]) -> Result<Self> {
        let mut distances = Matrix::new(coordinates.len());

        for (i, a) in coordinates.iter().enumerate() {
            for (j, b) in coordinates.iter().enumerate().skip(i + 1) {
                let d = a.distance_from(b);
                distances[i][j] = d;
                distances[j][i] = d;
            }
        }

        Self::new(distances)
    }

    pub fn sample() -> Result<Self> {
        let coordinates: Vec<Coordinate> = SAMPLE_PLACES
            .iter()
            .map(|&(x, y)| Coordinate { x, y })
            .collect();
        Self::from_coordinates(&coordinates)
    }

    /// Reads one `x y` (or `x,y`) pair per line. Blank lines are skipped.
    pub fn try_from_coordinates<R: Read>(mut reader: R) -> Result<Self> {
        let mut contents = String::new();
        reader.read_to_string(&mut contents)?;

        let regex = Regex::new(r"^\s*(?P<x>[-+0-9.eE]+)\s*[,\s]\s*(?P<y>[-+0-9.eE]+)\s*$")?;

        let coordinates: Vec<Coordinate> = contents
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| Coordinate::try_from_line(&regex, line))
            .collect::<Result<_>>()?;

        Self::from_coordinates(&coordinates)
    }

    /// Reads a comma separated distance matrix, one row per line.
    pub fn try_from_csv<R: Read>(mut reader: R) -> Result<Self> {
        use nom::combinator::all_consuming;
        use nom::{
            Err::{Error, Failure, Incomplete},
            Offset,
        };

        let mut contents = String::new();
        reader.read_to_string(&mut contents)?;

        let rows = match all_consuming(Self::parse_rows)(&contents) {
            Ok((_, rows)) => rows,

            // The error borrows from contents, so it is rendered here
            Err(Failure(err) | Error(err)) => {
                let mut message = String::from("Parsing distance matrix failed: ");
                for (error_slice, err) in err.errors {
                    let offset = contents.offset(error_slice);
                    message += &format!("{:?} at position {}; ", err, offset);
                }
                return Err(anyhow!(message));
            }

            Err(Incomplete(_)) => bail!("Parsing distance matrix failed: unexpected end of input"),
        };

        Self::new(Matrix::from_rows(rows)?)
    }

    fn parse_rows(i: &str) -> NomResult<&str, Vec<Vec<f64>>> {
        use nom::{
            character::complete::{char, line_ending, multispace0, space0},
            multi::separated_list1,
            number::complete::double,
            sequence::{delimited, preceded, terminated},
        };

        let cell = delimited(space0, double, space0);
        let row = separated_list1(char(','), cell);

        preceded(
            multispace0,
            terminated(separated_list1(line_ending, row), multispace0),
        )(i)
    }

    pub fn write_csv<W: Write>(&self, mut writer: W) -> Result<()> {
        for row in self.distances.rows() {
            let line: Vec<String> = row.iter().map(f64::to_string).collect();
            writeln!(writer, "{}", line.join(","))?;
        }
        Ok(())
    }

    pub fn distance(&self, i: usize, j: usize) -> f64 {
        self.distances[i][j]
    }

    pub fn distances(&self) -> &Matrix {
        &self.distances
    }

    pub fn num_nodes(&self) -> usize {
        self.distances.size()
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    fn try_from_line(regex: &Regex, line: &str) -> Result<Self> {
        let captures = regex
            .captures(line)
            .ok_or_else(|| anyhow!("Cannot match coordinate line '{}'", line))?;

        let x = captures["x"].parse::<f64>()?;
        let y = captures["y"].parse::<f64>()?;

        Ok(Self { x, y })
    }

    pub fn distance_from(&self, other: &Coordinate) -> f64 {
        ((other.y - self.y).powi(2) + (other.x - self.x).powi(2)).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{Matrix, Problem};

    #[test]
    fn sample_is_a_rectangle_perimeter() {
        let problem = Problem::sample().unwrap();
        assert_eq!(problem.num_nodes(), 8);

        let perimeter: f64 = (0..8).map(|i| problem.distance(i, (i + 1) % 8)).sum();
        assert_eq!(perimeter, 20.0);
        assert_eq!(problem.distance(0, 4), 50f64.sqrt());
        assert!(problem.distances().is_symmetric());
    }

    #[test]
    fn reads_csv_matrix() {
        let csv = "0, 1.5,2\n1.5,0,3\r\n2,3,0\n\n";
        let problem = Problem::try_from_csv(csv.as_bytes()).unwrap();
        assert_eq!(problem.num_nodes(), 3);
        assert_eq!(problem.distance(0, 1), 1.5);
        assert_eq!(problem.distance(2, 1), 3.0);
    }

    #[test]
    fn written_csv_reads_back() {
        let problem = Problem::sample().unwrap();
        let mut out = Vec::new();
        problem.write_csv(&mut out).unwrap();

        let reread = Problem::try_from_csv(out.as_slice()).unwrap();
        assert_eq!(reread.distances(), problem.distances());
    }

    #[test]
    fn csv_errors_report_position() {
        let err = Problem::try_from_csv("0,1,x\n1,0,1\n1,1,0".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("position"), "{}", err);
    }

    #[test]
    fn reads_coordinates_in_either_separator() {
        let input = "0 0\n\n3,0\n  3   4  \n";
        let problem = Problem::try_from_coordinates(input.as_bytes()).unwrap();
        assert_eq!(problem.distance(0, 1), 3.0);
        assert_eq!(problem.distance(0, 2), 5.0);
        assert_eq!(problem.distance(2, 1), 4.0);
    }

    #[test]
    fn rejects_malformed_matrices() {
        let cases: Vec<(Vec<Vec<f64>>, &str)> = vec![
            (vec![vec![0.0, 1.0], vec![1.0, 0.0]], "at least 3"),
            (
                vec![vec![0.0, -1.0, 1.0], vec![-1.0, 0.0, 1.0], vec![1.0, 1.0, 0.0]],
                "negative",
            ),
            (
                vec![vec![0.0, 1.0, 1.0], vec![2.0, 0.0, 1.0], vec![1.0, 1.0, 0.0]],
                "differs",
            ),
            (
                vec![vec![1.0, 1.0, 1.0], vec![1.0, 0.0, 1.0], vec![1.0, 1.0, 0.0]],
                "itself",
            ),
            (
                vec![vec![0.0, 0.0, 1.0], vec![0.0, 0.0, 1.0], vec![1.0, 1.0, 0.0]],
                "coincide",
            ),
        ];

        for (rows, expected) in cases {
            let err = Problem::new(Matrix::from_rows(rows).unwrap()).unwrap_err();
            assert!(err.to_string().contains(expected), "{}", err);
        }
    }

    #[test]
    fn rejects_non_square_csv() {
        assert!(Problem::try_from_csv("0,1,1\n1,0\n1,1,0\n".as_bytes()).is_err());
    }
}
