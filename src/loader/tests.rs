use std::cell::RefCell;
use std::io::{self, BufRead, Cursor, Read};

use super::{LineError, LoadError, LoadReport, TextLoader};
use crate::reporter::Reporter;
use crate::{LookupIndex, Record};

#[derive(Default)]
struct Capture {
    skipped: RefCell<Vec<(usize, LineError)>>,
    loaded: RefCell<Vec<LoadReport>>,
}

impl Reporter for Capture {
    fn skipped(&self, line: usize, error: &LineError) {
        self.skipped.borrow_mut().push((line, error.clone()));
    }

    fn loaded(&self, report: &LoadReport) {
        self.loaded.borrow_mut().push(*report);
    }
}

const NAMES: &str = "a ; Ahmed\na ; Anatole\n\na;Anais\n  b ;   Beatrice  \n";

#[test]
fn load_names() {
    let capture = Capture::default();
    let loader = TextLoader::new().with_reporter(&capture);

    let mut index = LookupIndex::<char, String>::new();
    let report = loader.load_str(&mut index, NAMES);

    assert_eq!(
        report,
        LoadReport {
            loaded: 4,
            skipped: 0
        }
    );
    assert!(capture.skipped.borrow().is_empty());
    assert_eq!(capture.loaded.borrow().as_slice(), [report]);
    assert_eq!(index.len(), 4);

    let a = index
        .get(&'a')
        .iter()
        .map(|r| r.value().as_str())
        .collect::<Vec<_>>();
    assert_eq!(a, ["Ahmed", "Anais", "Anatole"]);

    assert!(index.delete_record(&Record::new('b', String::from("Beatrice"))));
    assert!(index.find(&'b').is_none());
    assert_eq!(index.len(), 3);
}

#[test]
fn skips_malformed_lines() {
    let capture = Capture::default();
    let loader = TextLoader::new().with_reporter(&capture);

    let input = "1 ; 10\nno separator here\nx ; 20\n3 ; y\n   \n4 ; 40 \n";

    let mut index = LookupIndex::<i32, i32>::new();
    let report = loader.load_str(&mut index, input);

    assert_eq!(report.loaded, 2);
    assert_eq!(report.skipped, 3);
    assert_eq!(index.len(), 2);
    assert_eq!(index.get(&1).len(), 1);
    assert_eq!(index.get(&4).len(), 1);

    let skipped = capture.skipped.borrow();
    assert_eq!(skipped.len(), 3);

    assert_eq!(skipped[0].0, 2);
    assert!(matches!(
        &skipped[0].1,
        LineError::MissingSeparator { separator: ';', text } if &**text == "no separator here"
    ));

    assert_eq!(skipped[1].0, 3);
    assert!(matches!(&skipped[1].1, LineError::Key(field) if field.text() == "x"));

    assert_eq!(skipped[2].0, 4);
    assert!(matches!(&skipped[2].1, LineError::Value(field) if field.text() == "y"));
}

#[test]
fn parse_line() {
    let loader = TextLoader::new();

    assert_eq!(loader.parse_line::<char, String>("   "), Ok(None));
    assert_eq!(
        loader.parse_line::<char, String>("a ; b ; c"),
        Ok(Some(Record::new('a', String::from("b ; c"))))
    );
    assert_eq!(
        loader.parse_line::<char, String>(" abc "),
        Err(LineError::MissingSeparator {
            separator: ';',
            text: "abc".into(),
        })
    );
    assert!(matches!(
        loader.parse_line::<char, String>(" ; empty key"),
        Err(LineError::Key(..))
    ));
    assert_eq!(
        loader.parse_line::<char, String>("a ;"),
        Ok(Some(Record::new('a', String::new())))
    );
}

#[test]
fn custom_separator() {
    let loader = TextLoader::new().with_separator(',');

    let mut index = LookupIndex::<i32, String>::new();
    let report = loader.load_str(&mut index, "12, Simon\n12 ; Ignored\n");

    assert_eq!(report.loaded, 1);
    assert_eq!(report.skipped, 1);
    assert_eq!(index.get(&12)[0].value(), "Simon");
}

#[test]
fn reader_skips_invalid_utf8() {
    let capture = Capture::default();
    let loader = TextLoader::new().with_reporter(&capture);

    let mut input = b"200 ; 267\r\n".to_vec();
    input.extend_from_slice(&[0xff, 0xfe, b'\n']);
    input.extend_from_slice(b"200 ; 100");

    let mut index = LookupIndex::<i32, i32>::new();
    let report = loader.load_reader(&mut index, Cursor::new(input)).unwrap();

    assert_eq!(report.loaded, 2);
    assert_eq!(report.skipped, 1);

    let values = index.get(&200).iter().map(|r| *r.value()).collect::<Vec<_>>();
    assert_eq!(values, [100, 267]);
    assert_eq!(
        capture.skipped.borrow().as_slice(),
        [(2, LineError::Encoding)]
    );
}

struct Broken;

impl Read for Broken {
    fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::Other, "broken"))
    }
}

impl BufRead for Broken {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        Err(io::Error::new(io::ErrorKind::Other, "broken"))
    }

    fn consume(&mut self, _: usize) {}
}

#[test]
fn reader_failure() {
    let mut index = LookupIndex::<i32, i32>::new();
    let error = TextLoader::new().load_reader(&mut index, Broken).unwrap_err();

    assert!(matches!(error, LoadError::Read { line: 1, .. }));
    assert!(index.is_empty());
}

#[test]
fn missing_file() {
    let mut index = LookupIndex::<i32, i32>::new();
    let error = index
        .load_path("this/path/does/not/exist.txt")
        .unwrap_err();

    assert!(matches!(error, LoadError::Open { .. }));
    assert_eq!(
        error.to_string(),
        "Failed to open `this/path/does/not/exist.txt`"
    );
}
