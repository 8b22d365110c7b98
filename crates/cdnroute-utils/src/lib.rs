//! Utilities for reading problem instances and writing solutions.

#![warn(unreachable_pub, missing_debug_implementations, missing_docs)]

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use cdnroute_core::{Problem, Solution, ValidProblem};

/// Reads a [`Problem`] from a file in JSON or MessagePack format.
pub fn read_problem(path: impl AsRef<Path>) -> Result<Problem, Error> {
    let path = path.as_ref();
    let problem: Problem = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => {
            let contents = std::fs::read_to_string(path)?;
            serde_json::from_str(&contents)?
        }
        Some("msgpack") => {
            let f = File::open(path)?;
            let reader = BufReader::new(f);
            rmp_serde::decode::from_read(reader)?
        }
        _ => return Err(Error::UnknownFileType(path.into())),
    };
    Ok(problem)
}

/// Reads and validates a [`Problem`].
pub fn read_valid_problem(path: impl AsRef<Path>) -> Result<ValidProblem, Error> {
    Ok(read_problem(path)?.validate()?)
}

/// Writes a [`Solution`] as JSON to `writer`.
pub fn write_solution(solution: &Solution, writer: impl Write, pretty: bool) -> Result<(), Error> {
    let mut writer = BufWriter::new(writer);
    if pretty {
        serde_json::to_writer_pretty(&mut writer, solution)?;
    } else {
        serde_json::to_writer(&mut writer, solution)?;
    }
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Writes a [`Solution`] as JSON to the file at `path`, replacing it if it exists.
pub fn write_solution_file(
    solution: &Solution,
    path: impl AsRef<Path>,
    pretty: bool,
) -> Result<(), Error> {
    let f = File::create(path)?;
    write_solution(solution, f, pretty)
}

/// Error kinds for problem files and I/O.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Unknown file type.
    #[error("unknown file type: {0}")]
    UnknownFileType(PathBuf),

    /// Error serializing/deserializing JSON.
    #[error("JSON error")]
    Json(#[from] serde_json::Error),

    /// Error deserializing MsgPack.
    #[error("MsgPack error")]
    MsgPack(#[from] rmp_serde::decode::Error),

    /// I/O error.
    #[error("IO error")]
    Io(#[from] std::io::Error),

    /// The problem is malformed.
    #[error("invalid problem")]
    Problem(#[from] cdnroute_core::ProblemError),
}

#[cfg(test)]
mod tests {
    use anyhow::Context;
    use cdnroute_core::{NodeId, Outcome};

    use super::*;

    const DETOUR: &str = r#"{
        "nodes": [
            { "id": 0, "capacity": 1 },
            { "id": 1, "capacity": 1 },
            { "id": 2, "capacity": 5 },
            { "id": 3, "capacity": 5 },
            { "id": 4, "capacity": 5 },
            { "id": 5, "capacity": 5 }
        ],
        "links": [
            { "a": 0, "b": 1 },
            { "a": 0, "b": 2 },
            { "a": 1, "b": 4 },
            { "a": 1, "b": 5 },
            { "a": 2, "b": 3 },
            { "a": 3, "b": 5 }
        ],
        "provider": 0,
        "clients": [
            { "node": 4, "payment": 10 },
            { "node": 5, "payment": 1 }
        ]
    }"#;

    #[test]
    fn read_json_problem() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("detour.json");
        std::fs::write(&path, DETOUR)?;
        let problem = read_problem(&path).context("failed to read problem")?;
        assert_eq!(problem.nodes.len(), 6);
        assert_eq!(problem.links.len(), 6);
        assert_eq!(problem.provider, NodeId::new(0));
        assert_eq!(problem.clients.len(), 2);
        Ok(())
    }

    #[test]
    fn read_msgpack_problem() -> anyhow::Result<()> {
        let problem: Problem = serde_json::from_str(DETOUR)?;
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("detour.msgpack");
        std::fs::write(&path, rmp_serde::to_vec(&problem)?)?;
        let read = read_problem(&path)?;
        assert_eq!(read.clients, problem.clients);
        assert_eq!(read.links, problem.links);
        Ok(())
    }

    #[test]
    fn unknown_extension_fails() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("detour.yaml");
        std::fs::write(&path, DETOUR)?;
        assert!(matches!(read_problem(&path), Err(Error::UnknownFileType(..))));
        Ok(())
    }

    #[test]
    fn invalid_problem_fails() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("bad.json");
        std::fs::write(&path, DETOUR.replace(r#""node": 5"#, r#""node": 0"#))?;
        assert!(matches!(read_valid_problem(&path), Err(Error::Problem(..))));
        Ok(())
    }

    #[test]
    fn solution_round_trips_through_file() -> anyhow::Result<()> {
        let problem: Problem = serde_json::from_str(DETOUR)?;
        let solution = cdnroute_core::run(problem)?;
        assert_eq!(solution.outcome(), Outcome::Resolved);
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("solution.json");
        write_solution_file(&solution, &path, true)?;
        let contents = std::fs::read_to_string(&path)?;
        let read: Solution = serde_json::from_str(&contents)?;
        assert_eq!(read, solution);
        Ok(())
    }
}
