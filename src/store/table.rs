//! Tab-separated dumps of the accession and logical database tables.
//!
//! `accessions.tsv` columns: `accID`, `_Object_key`, `_MGIType_key`,
//! `_LogicalDB_key`, `preferred` (0 or 1).
//!
//! `logical_dbs.tsv` columns: `_LogicalDB_key`, `name`.
//!
//! In both files a header line is optional, and blank lines and lines
//! starting with `#` are ignored.

use std::collections::HashMap;
use std::path::Path;

use crate::core::types::{IdentifierRelation, LogicalDbKey, MgiType, ObjectKey, MGI_LOGICAL_DB};

use super::{AccessionSource, StoreError};

/// One row of the accession table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessionRow {
    pub acc_id: String,
    pub object_key: ObjectKey,
    pub mgi_type: MgiType,
    pub logical_db: LogicalDbKey,
    pub preferred: bool,
}

impl AccessionRow {
    pub fn new(
        acc_id: impl Into<String>,
        object_key: u64,
        mgi_type: MgiType,
        logical_db: u32,
    ) -> Self {
        Self {
            acc_id: acc_id.into(),
            object_key: ObjectKey(object_key),
            mgi_type,
            logical_db: LogicalDbKey(logical_db),
            preferred: true,
        }
    }

    #[cfg(test)]
    pub fn not_preferred(mut self) -> Self {
        self.preferred = false;
        self
    }

    fn is(&self, mgi_type: MgiType, logical_db: LogicalDbKey) -> bool {
        self.preferred && self.mgi_type == mgi_type && self.logical_db == logical_db
    }
}

/// In-memory accession table
#[derive(Debug, Default)]
pub struct AccessionTable {
    rows: Vec<AccessionRow>,
    logical_dbs: HashMap<String, LogicalDbKey>,
}

impl AccessionTable {
    pub fn new(rows: Vec<AccessionRow>, logical_dbs: HashMap<String, LogicalDbKey>) -> Self {
        Self { rows, logical_dbs }
    }

    /// Load both table dumps from disk
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if either file cannot be read, or
    /// `StoreError::InvalidFormat` if either file contains a malformed row.
    pub fn load(accessions: &Path, logical_dbs: &Path) -> Result<Self, StoreError> {
        let rows = parse_accessions_text(&std::fs::read_to_string(accessions)?)?;
        let logical_dbs = parse_logical_dbs_text(&std::fs::read_to_string(logical_dbs)?)?;
        Ok(Self::new(rows, logical_dbs))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl AccessionSource for AccessionTable {
    fn logical_db_key(&self, name: &str) -> Result<LogicalDbKey, StoreError> {
        self.logical_dbs
            .get(name)
            .copied()
            .ok_or_else(|| StoreError::UnknownLogicalDb(name.to_string()))
    }

    fn marker_relations(
        &self,
        gene_model_db: LogicalDbKey,
    ) -> Result<Vec<IdentifierRelation>, StoreError> {
        let mut mgi_ids: HashMap<ObjectKey, Vec<&str>> = HashMap::new();
        for row in self.rows.iter().filter(|r| r.is(MgiType::Marker, MGI_LOGICAL_DB)) {
            mgi_ids.entry(row.object_key).or_default().push(&row.acc_id);
        }

        let mut relations = Vec::new();
        for row in self.rows.iter().filter(|r| r.is(MgiType::Marker, gene_model_db)) {
            if let Some(ids) = mgi_ids.get(&row.object_key) {
                for mgi_id in ids {
                    relations.push(IdentifierRelation::new(row.acc_id.as_str(), *mgi_id));
                }
            }
        }

        relations.sort();
        Ok(relations)
    }

    fn sequence_keys(
        &self,
        gene_model_db: LogicalDbKey,
    ) -> Result<Vec<(String, ObjectKey)>, StoreError> {
        Ok(self
            .rows
            .iter()
            .filter(|r| r.is(MgiType::Sequence, gene_model_db))
            .map(|r| (r.acc_id.clone(), r.object_key))
            .collect())
    }
}

/// Iterate over the data lines of a table dump, skipping comments, blank
/// lines and a header whose first column is `header_first`.
/// Yields 1-based line numbers with the split fields.
fn data_lines<'a>(
    text: &'a str,
    header_first: &'a str,
) -> impl Iterator<Item = (usize, Vec<&'a str>)> + 'a {
    let mut first_data_line = true;
    text.lines()
        .enumerate()
        .filter_map(move |(i, line)| {
            if line.trim().is_empty() || line.starts_with('#') {
                return None;
            }
            let fields: Vec<&str> = line.split('\t').map(str::trim).collect();
            if first_data_line {
                first_data_line = false;
                if fields[0].eq_ignore_ascii_case(header_first) {
                    return None;
                }
            }
            Some((i + 1, fields))
        })
}

fn parse_field<T: std::str::FromStr>(
    value: &str,
    column: &str,
    line_num: usize,
) -> Result<T, StoreError> {
    value.parse().map_err(|_| {
        StoreError::InvalidFormat(format!("Invalid {column} on line {line_num}: '{value}'"))
    })
}

/// Parse the accession table dump
///
/// # Errors
///
/// Returns `StoreError::InvalidFormat` if a line has fewer than 5 fields or
/// a key column is not numeric.
pub fn parse_accessions_text(text: &str) -> Result<Vec<AccessionRow>, StoreError> {
    let mut rows = Vec::new();

    for (line_num, fields) in data_lines(text, "accID") {
        if fields.len() < 5 {
            return Err(StoreError::InvalidFormat(format!(
                "Line {line_num} has fewer than 5 fields"
            )));
        }

        let preferred = match fields[4] {
            "1" => true,
            "0" => false,
            other => {
                return Err(StoreError::InvalidFormat(format!(
                    "Invalid preferred flag on line {line_num}: '{other}'"
                )))
            }
        };

        rows.push(AccessionRow {
            acc_id: fields[0].to_string(),
            object_key: ObjectKey(parse_field(fields[1], "_Object_key", line_num)?),
            mgi_type: MgiType::from_key(parse_field(fields[2], "_MGIType_key", line_num)?),
            logical_db: LogicalDbKey(parse_field(fields[3], "_LogicalDB_key", line_num)?),
            preferred,
        });
    }

    Ok(rows)
}

/// Parse the logical database dump into a name -> key map
///
/// # Errors
///
/// Returns `StoreError::InvalidFormat` if a line has fewer than 2 fields, the
/// key is not numeric, or a name appears twice with different keys.
pub fn parse_logical_dbs_text(text: &str) -> Result<HashMap<String, LogicalDbKey>, StoreError> {
    let mut names = HashMap::new();

    for (line_num, fields) in data_lines(text, "_LogicalDB_key") {
        if fields.len() < 2 {
            return Err(StoreError::InvalidFormat(format!(
                "Line {line_num} has fewer than 2 fields"
            )));
        }

        let key = LogicalDbKey(parse_field(fields[0], "_LogicalDB_key", line_num)?);
        let name = fields[1].to_string();

        if let Some(existing) = names.insert(name.clone(), key) {
            if existing != key {
                return Err(StoreError::InvalidFormat(format!(
                    "Logical database '{name}' has keys {existing} and {key}"
                )));
            }
        }
    }

    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENSEMBL_GM: u32 = 60;

    fn table() -> AccessionTable {
        let rows = vec![
            AccessionRow::new("MGI:101", 1, MgiType::Marker, 1),
            AccessionRow::new("ENSMUSG01", 1, MgiType::Marker, ENSEMBL_GM),
            AccessionRow::new("MGI:202", 2, MgiType::Marker, 1),
            AccessionRow::new("MGI:200", 2, MgiType::Marker, 1).not_preferred(),
            AccessionRow::new("ENSMUSG02", 2, MgiType::Marker, ENSEMBL_GM),
            AccessionRow::new("ENSMUSG02", 3, MgiType::Marker, ENSEMBL_GM),
            AccessionRow::new("MGI:303", 3, MgiType::Marker, 1),
            AccessionRow::new("OTTMUSG01", 2, MgiType::Marker, 85),
            AccessionRow::new("ENSMUSG01", 10, MgiType::Sequence, ENSEMBL_GM),
            AccessionRow::new("ENSMUSG09", 11, MgiType::Sequence, ENSEMBL_GM),
            AccessionRow::new("ENSMUSG08", 12, MgiType::Sequence, ENSEMBL_GM).not_preferred(),
        ];
        let mut dbs = HashMap::new();
        dbs.insert("ENSEMBL Gene Model".to_string(), LogicalDbKey(ENSEMBL_GM));
        AccessionTable::new(rows, dbs)
    }

    #[test]
    fn test_marker_relations_join_on_object_key() {
        let relations = table().marker_relations(LogicalDbKey(ENSEMBL_GM)).unwrap();
        assert_eq!(
            relations,
            vec![
                IdentifierRelation::new("ENSMUSG01", "MGI:101"),
                IdentifierRelation::new("ENSMUSG02", "MGI:202"),
                IdentifierRelation::new("ENSMUSG02", "MGI:303"),
            ]
        );
    }

    #[test]
    fn test_marker_relations_other_namespace() {
        let relations = table().marker_relations(LogicalDbKey(85)).unwrap();
        assert_eq!(relations, vec![IdentifierRelation::new("OTTMUSG01", "MGI:202")]);
    }

    #[test]
    fn test_sequence_keys_preferred_only() {
        let keys = table().sequence_keys(LogicalDbKey(ENSEMBL_GM)).unwrap();
        assert_eq!(
            keys,
            vec![
                ("ENSMUSG01".to_string(), ObjectKey(10)),
                ("ENSMUSG09".to_string(), ObjectKey(11)),
            ]
        );
    }

    #[test]
    fn test_logical_db_lookup() {
        let table = table();
        assert_eq!(
            table.logical_db_key("ENSEMBL Gene Model").unwrap(),
            LogicalDbKey(ENSEMBL_GM)
        );
        assert!(matches!(
            table.logical_db_key("VEGA Gene Model"),
            Err(StoreError::UnknownLogicalDb(_))
        ));
    }

    #[test]
    fn test_parse_accessions_text() {
        let text = "# dump of ACC_Accession\n\
                    accID\t_Object_key\t_MGIType_key\t_LogicalDB_key\tpreferred\n\
                    MGI:101\t1\t2\t1\t1\n\
                    \n\
                    ENSMUSG01\t10\t19\t60\t0\n";
        let rows = parse_accessions_text(text).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].acc_id, "MGI:101");
        assert_eq!(rows[0].mgi_type, MgiType::Marker);
        assert!(rows[0].preferred);
        assert_eq!(rows[1].object_key, ObjectKey(10));
        assert_eq!(rows[1].mgi_type, MgiType::Sequence);
        assert!(!rows[1].preferred);
    }

    #[test]
    fn test_parse_accessions_bad_key_reports_line() {
        let text = "MGI:101\t1\t2\t1\t1\nMGI:102\tx\t2\t1\t1\n";
        let err = parse_accessions_text(text).unwrap_err();
        assert!(err.to_string().contains("line 2"), "{err}");
    }

    #[test]
    fn test_parse_accessions_short_line() {
        assert!(parse_accessions_text("MGI:101\t1\t2\n").is_err());
    }

    #[test]
    fn test_parse_logical_dbs_text() {
        let text = "_LogicalDB_key\tname\n1\tMGI\n60\tENSEMBL Gene Model\n";
        let dbs = parse_logical_dbs_text(text).unwrap();
        assert_eq!(dbs.get("MGI"), Some(&LogicalDbKey(1)));
        assert_eq!(dbs.get("ENSEMBL Gene Model"), Some(&LogicalDbKey(60)));
    }

    #[test]
    fn test_parse_logical_dbs_conflict() {
        let text = "1\tMGI\n2\tMGI\n";
        assert!(parse_logical_dbs_text(text).is_err());
    }
}
