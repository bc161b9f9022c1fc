//! Table file I/O
//!
//! Persists a finalized table as newline-delimited text: a header line with
//! the chain count and table index, then one `startpoint endpoint` pair per
//! line. The loader trusts the writer's sort order but verifies the header
//! shape, the symbol alphabet and the declared chain count; disagreements
//! surface as recoverable errors.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::domain::chain::Chain;
use crate::domain::table::RainbowTable;
use crate::error::RainbowError;

/// Save a finalized table.
pub fn save_table(path: impl AsRef<Path>, table: &RainbowTable) -> Result<(), RainbowError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "{} {}", table.len(), table.table_index())?;
    for chain in table.chains() {
        writeln!(writer, "{} {}", chain.startpoint, chain.endpoint)?;
    }

    writer.flush()?;
    Ok(())
}

/// Load a table persisted by [`save_table`].
///
/// Chains are appended in file order; the writer already sorted and
/// deduplicated them, so no re-sorting happens here.
pub fn load_table(path: impl AsRef<Path>) -> Result<RainbowTable, RainbowError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut lines = reader.lines();

    let header = lines.next().ok_or(RainbowError::MissingHeader)??;
    let (declared, table_index) = parse_header(&header)?;

    let mut table = RainbowTable::with_capacity(table_index, declared)?;
    for (index, line) in lines.enumerate() {
        let line = line?;
        let mut tokens = line.split_whitespace();

        let (Some(startpoint), Some(endpoint), None) =
            (tokens.next(), tokens.next(), tokens.next())
        else {
            return Err(RainbowError::MalformedChain { line: index + 2 });
        };

        table.push(Chain::new(startpoint.parse()?, endpoint.parse()?));
    }

    if table.len() != declared {
        return Err(RainbowError::ChainCountMismatch {
            declared,
            found: table.len(),
        });
    }

    Ok(table)
}

fn parse_header(header: &str) -> Result<(usize, u32), RainbowError> {
    let malformed = || RainbowError::MalformedHeader(header.to_string());

    let mut tokens = header.split_whitespace();
    let (Some(length), Some(index), None) = (tokens.next(), tokens.next(), tokens.next()) else {
        return Err(malformed());
    };

    let declared = length.parse().map_err(|_| malformed())?;
    let table_index = index.parse().map_err(|_| malformed())?;
    Ok((declared, table_index))
}

/// File name for a stored table: `length<L>_<index>.rt`.
pub fn table_file_name(password_length: usize, table_index: u32) -> String {
    format!("length{}_{}.rt", password_length, table_index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::alphabet::startpoint_of;
    use tempfile::TempDir;

    fn sample_table() -> RainbowTable {
        let chains = vec![
            Chain::new(startpoint_of(4, 3), "00A".parse().unwrap()),
            Chain::new(startpoint_of(1, 3), "0zz".parse().unwrap()),
            Chain::new(startpoint_of(9, 3), "-0_".parse().unwrap()),
        ];
        RainbowTable::from_parts(2, chains)
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(table_file_name(3, 2));

        let table = sample_table();
        save_table(&path, &table).unwrap();
        let loaded = load_table(&path).unwrap();

        assert_eq!(loaded, table);
    }

    #[test]
    fn test_save_empty_table() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.rt");

        let table = RainbowTable::from_parts(7, Vec::new());
        save_table(&path, &table).unwrap();
        let loaded = load_table(&path).unwrap();

        assert!(loaded.is_empty());
        assert_eq!(loaded.table_index(), 7);
    }

    #[test]
    fn test_file_format() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("format.rt");

        save_table(&path, &sample_table()).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();

        assert_eq!(text, "3 2\n004 00A\n001 0zz\n009 -0_\n");
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = load_table("/nonexistent/path/table.rt");
        assert!(matches!(result, Err(RainbowError::Io(_))));
    }

    #[test]
    fn test_table_file_name() {
        assert_eq!(table_file_name(3, 0), "length3_0.rt");
        assert_eq!(table_file_name(4, 15), "length4_15.rt");
    }
}
