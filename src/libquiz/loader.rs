use crate::{Error, Result};
use csv::{ReaderBuilder, StringRecord};
use log::{debug, error};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Instant;

const FIELDS_PER_ROW: usize = 2;

/// Opens the csv file at `path` and reads every row into memory.
pub fn load_rows(path: &Path) -> Result<Vec<Vec<String>>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) => {
            error!("[Load] Cannot open {:?}: {}", path, err);
            return Err(Error::FileNotFound(path.to_path_buf()));
        }
    };
    debug!("[Load] Opened {:?}", path);
    read_rows(file)
}

/// Reads headerless `question,answer` rows. Any row without exactly two
/// fields fails the whole load.
pub fn read_rows<R: Read>(source: R) -> Result<Vec<Vec<String>>> {
    let now = Instant::now();
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(source);

    let mut rows = Vec::new();
    let mut record = StringRecord::new();
    loop {
        match reader.read_record(&mut record) {
            Ok(false) => break,
            Ok(true) => {}
            Err(err) => {
                let line = err.position().map(|pos| pos.line()).unwrap_or(0);
                return Err(Error::Parse {
                    line,
                    reason: err.to_string(),
                });
            }
        }

        if record.len() != FIELDS_PER_ROW {
            let line = record.position().map(|pos| pos.line()).unwrap_or(0);
            return Err(Error::Parse {
                line,
                reason: format!(
                    "expected {} fields, found {}",
                    FIELDS_PER_ROW,
                    record.len()
                ),
            });
        }
        rows.push(record.iter().map(String::from).collect());
    }

    debug!(
        "[Load] Read {} rows in {} ms.",
        rows.len(),
        now.elapsed().as_millis()
    );
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_rows_in_order() {
        let rows = read_rows("5+5,10\n2+2,4\n".as_bytes()).unwrap();
        assert_eq!(
            rows,
            vec![
                vec!["5+5".to_string(), "10".to_string()],
                vec!["2+2".to_string(), "4".to_string()],
            ]
        );
    }

    #[test]
    fn keeps_surrounding_whitespace() {
        let rows = read_rows(" what is 3+4 ,  7 \n".as_bytes()).unwrap();
        assert_eq!(rows[0], vec![" what is 3+4 ", "  7 "]);
    }

    #[test]
    fn quoted_field_may_contain_comma() {
        let rows = read_rows("\"1,2 or 3?\",3\n".as_bytes()).unwrap();
        assert_eq!(rows[0][0], "1,2 or 3?");
    }

    #[test]
    fn single_field_row_is_a_parse_error() {
        match read_rows("5+5,10\nlonely\n".as_bytes()) {
            Err(Error::Parse { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn three_field_row_is_a_parse_error() {
        assert!(matches!(
            read_rows("a,b,c\n".as_bytes()),
            Err(Error::Parse { .. })
        ));
    }

    #[test]
    fn empty_input_has_no_rows() {
        assert!(read_rows("".as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn missing_file_is_reported() {
        let path = Path::new("definitely/not/here/problems.csv");
        match load_rows(path) {
            Err(Error::FileNotFound(p)) => assert_eq!(p, path),
            other => panic!("expected missing file, got {:?}", other),
        }
    }
}
