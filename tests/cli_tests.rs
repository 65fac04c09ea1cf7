//! Command-line tests against the built `gm-seqload` binary.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const ACCESSIONS: &str = "\
accID\t_Object_key\t_MGIType_key\t_LogicalDB_key\tpreferred
MGI:87853\t1\t2\t1\t1
MGI:87854\t1\t2\t1\t1
ENSMUSG00000000001\t1\t2\t60\t1
ENSMUSG00000000001\t100\t19\t60\t1
ENSMUSG00000000002\t101\t19\t60\t1
";

const LOGICAL_DBS: &str = "\
_LogicalDB_key\tname
1\tMGI
60\tENSEMBL Gene Model
";

const PROTEINS: &str = "\
>ENSMUSP00000000001.4 pep:known chromosome:GRCm39:3:108014596:108053462:-1 gene:ENSMUSG00000000001.5 transcript:ENSMUST00000000001.5
MPAGAPRARRPRVGALLLLLAALAGGAQA
>ENSMUSP00000000002.1 pep:known chromosome:GRCm39:X:77837901:77853623:-1 gene:ENSMUSG00000000002.1
MKVLAAGIVALLLA
>ENSMUSP00000000003.1 pep:known chromosome:GRCm39:X:77837902:77853624:-1 gene:ENSMUSG00000000003.1
MKV
>ENSMUSP00000000004.1 pep:known
MKV
";

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("accessions.tsv"), ACCESSIONS).unwrap();
        std::fs::write(dir.path().join("logical_dbs.tsv"), LOGICAL_DBS).unwrap();
        std::fs::write(dir.path().join("proteins.fa"), PROTEINS).unwrap();
        Self { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn load(&self) -> Command {
        let mut cmd = Command::cargo_bin("gm-seqload").unwrap();
        cmd.env_clear()
            .arg("load")
            .arg(self.path("proteins.fa"))
            .arg("--accessions")
            .arg(self.path("accessions.tsv"))
            .arg("--logical-dbs")
            .arg(self.path("logical_dbs.tsv"));
        cmd
    }
}

fn read(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap()
}

#[test]
fn test_load_writes_association_file() {
    let fixture = Fixture::new();
    let assoc = fixture.path("assoc.txt");

    fixture
        .load()
        .arg("--assoc-file")
        .arg(&assoc)
        .args(["--gm-logical-db", "ENSEMBL Gene Model"])
        .args(["--seq-logical-db", "Ensembl Protein"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Total Associations written to assocload file: 2",
        ));

    assert_eq!(
        read(&assoc),
        "MGI\tEnsembl Protein\nMGI:87853\tENSMUSP00000000001\nMGI:87854\tENSMUSP00000000001\n"
    );
}

#[test]
fn test_load_reads_parameters_from_environment() {
    let fixture = Fixture::new();
    let assoc = fixture.path("assoc.txt");

    fixture
        .load()
        .env("INFILE_ASSOCLOAD", &assoc)
        .env("GM_LOGICALDB", "ENSEMBL Gene Model")
        .env("SEQ_LOGICALDB", "Ensembl Protein")
        .assert()
        .success();

    assert!(read(&assoc).starts_with("MGI\tEnsembl Protein\n"));
}

#[test]
fn test_load_with_sequences_reports_follow_up() {
    let fixture = Fixture::new();
    let staging = fixture.path("sequences.jsonl");

    fixture
        .load()
        .arg("--assoc-file")
        .arg(fixture.path("assoc.txt"))
        .args(["--gm-logical-db", "ENSEMBL Gene Model"])
        .args(["--seq-logical-db", "Ensembl Protein"])
        .arg("--load-seqs")
        .arg("--seq-output")
        .arg(&staging)
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Sequences Loaded: 3"))
        .stdout(predicate::str::contains(
            "1 Gene Models not found In MGI:\nENSMUSG00000000003\t1",
        ))
        .stdout(predicate::str::contains(
            "GM ID not associated with marker: ENSMUSG00000000002 therefore SeqID not associated with marker: ENSMUSP00000000002",
        ))
        .stderr(predicate::str::contains("Skipping sequence"));

    assert_eq!(read(&staging).lines().count(), 3);
}

#[test]
fn test_load_seqs_accepts_numeric_environment_value() {
    let fixture = Fixture::new();
    let staging = fixture.path("sequences.jsonl");

    fixture
        .load()
        .arg("--assoc-file")
        .arg(fixture.path("assoc.txt"))
        .args(["--gm-logical-db", "ENSEMBL Gene Model"])
        .args(["--seq-logical-db", "Ensembl Protein"])
        .env("LOAD_SEQS", "1")
        .env("SEQ_OUTPUT", &staging)
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Sequences Loaded: 3"));

    assert_eq!(read(&staging).lines().count(), 3);
}

#[test]
fn test_load_seqs_disabled_by_environment() {
    let fixture = Fixture::new();

    fixture
        .load()
        .arg("--assoc-file")
        .arg(fixture.path("assoc.txt"))
        .args(["--gm-logical-db", "ENSEMBL Gene Model"])
        .args(["--seq-logical-db", "Ensembl Protein"])
        .env("LOAD_SEQS", "no")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Sequences Loaded").not());
}

#[test]
fn test_load_json_report() {
    let fixture = Fixture::new();

    let output = fixture
        .load()
        .arg("--assoc-file")
        .arg(fixture.path("assoc.txt"))
        .args(["--gm-logical-db", "ENSEMBL Gene Model"])
        .args(["--seq-logical-db", "Ensembl Protein"])
        .arg("--load-seqs")
        .arg("--seq-output")
        .arg(fixture.path("sequences.jsonl"))
        .args(["--format", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["associations"], 2);
    assert_eq!(report["skipped"], 1);
    assert_eq!(report["gene_models_not_in_store"]["ENSMUSG00000000003"], 1);
}

#[test]
fn test_missing_parameter_is_named() {
    let fixture = Fixture::new();
    let assoc = fixture.path("assoc.txt");

    fixture
        .load()
        .arg("--assoc-file")
        .arg(&assoc)
        .args(["--seq-logical-db", "Ensembl Protein"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("GM_LOGICALDB"));

    assert!(!assoc.exists());
}

#[test]
fn test_load_seqs_requires_staging_file() {
    let fixture = Fixture::new();

    fixture
        .load()
        .arg("--assoc-file")
        .arg(fixture.path("assoc.txt"))
        .args(["--gm-logical-db", "ENSEMBL Gene Model"])
        .args(["--seq-logical-db", "Ensembl Protein"])
        .arg("--load-seqs")
        .assert()
        .failure()
        .stderr(predicate::str::contains("SEQ_OUTPUT"));
}

#[test]
fn test_unknown_logical_db_fails_without_output() {
    let fixture = Fixture::new();
    let assoc = fixture.path("assoc.txt");

    fixture
        .load()
        .arg("--assoc-file")
        .arg(&assoc)
        .args(["--gm-logical-db", "VEGA Gene Model"])
        .args(["--seq-logical-db", "VEGA Protein"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("VEGA Gene Model"));

    assert!(!assoc.exists());
}

#[test]
fn test_seqassoc_from_stdin() {
    let fixture = Fixture::new();
    let output = fixture.path("seqassoc.txt");

    Command::cargo_bin("gm-seqload")
        .unwrap()
        .env_clear()
        .arg("seqassoc")
        .arg("--output")
        .arg(&output)
        .args(["--seq-position", "3", "--qualifier", "translation_of"])
        .write_stdin(PROTEINS)
        .assert()
        .success()
        .stdout(predicate::str::contains("Sequence associations written: 3"))
        .stdout(predicate::str::contains("Sequences skipped: 1"));

    let content = read(&output);
    assert_eq!(content.lines().count(), 3);
    assert!(content.starts_with("ENSMUSP00000000001.4\ttranslation_of\tENSMUSG00000000001.5\n"));
}

#[test]
fn test_seqassoc_requires_qualifier() {
    let fixture = Fixture::new();

    Command::cargo_bin("gm-seqload")
        .unwrap()
        .env_clear()
        .arg("seqassoc")
        .arg("--fasta")
        .arg(fixture.path("proteins.fa"))
        .arg("--output")
        .arg(fixture.path("seqassoc.txt"))
        .args(["--seq-position", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("QUALIFIER"));
}
