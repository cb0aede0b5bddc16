use crate::table::{LookalikeTable, TableError};
use crate::Error;

#[test]
fn cyrillic_table() {
    let table = LookalikeTable::cyrillic();
    assert_eq!(table.len(), 22);
    assert_eq!(table.get('\u{0430}'), Some('a'));
    assert_eq!(table.get('\u{041D}'), Some('H'));
    assert_eq!(table.get('\u{0405}'), Some('S'));
    assert_eq!(table.get('a'), None);
    // values are plain ASCII letters
    assert!(table.iter().all(|(_, v)| v.is_ascii_alphabetic()));
    assert!(table.iter().all(|(k, _)| !k.is_ascii()));
}

#[test]
fn iter_is_sorted() {
    let keys: Vec<_> = LookalikeTable::cyrillic().iter().map(|(k, _)| k).collect();
    let mut sorted = keys.clone();
    sorted.sort_unstable();
    assert_eq!(keys, sorted);
}

#[test]
fn normalize_and_detect() {
    let table = LookalikeTable::cyrillic();
    let mixed = "\u{0421}ase \u{0445}1";
    assert!(table.contains_lookalike(mixed));
    assert_eq!(table.normalize(mixed), "Case x1");
    assert!(!table.contains_lookalike("Case x1"));
}

#[test]
fn rejects_chains() {
    let err = LookalikeTable::new([('x', 'y'), ('y', 'z')]).unwrap_err();
    assert_eq!(err, TableError::Chained { key: 'x', value: 'y' });

    assert!(matches!(
        LookalikeTable::new([('a', 'a')]),
        Err(TableError::Chained { .. })
    ));
}

#[test]
fn rejects_conflicts() {
    let err = LookalikeTable::new([('Ω', 'O'), ('Ω', '0')]).unwrap_err();
    assert_eq!(
        err,
        TableError::Conflict {
            key: 'Ω',
            first: 'O',
            second: '0'
        }
    );
    // repeating an identical entry is fine
    assert_eq!(LookalikeTable::new([('Ω', 'O'), ('Ω', 'O')]).unwrap().len(), 1);
}

#[test]
fn empty_table_changes_nothing() {
    let table = LookalikeTable::new([]).unwrap();
    assert!(table.is_empty());
    assert!(crate::transform_with(&table, "(Ω)").is_unchanged());
}

#[test]
fn from_json() -> Result<(), Box<dyn std::error::Error>> {
    let table = LookalikeTable::from_json(r#"{ "Ω": "O", "Σ": "S" }"#)?;
    assert_eq!(table.len(), 2);
    assert_eq!(table.get('Σ'), Some('S'));
    Ok(())
}

#[test]
fn from_json_rejects_bad_entries() {
    let err = LookalikeTable::from_json(r#"{ "ΩΩ": "O" }"#).unwrap_err();
    assert!(
        matches!(err, Error::Table(TableError::NotSingleChar(ref s)) if s == "ΩΩ"),
        "{err}"
    );

    let err = LookalikeTable::from_json(r#"{ "Ω": "" }"#).unwrap_err();
    assert!(matches!(err, Error::Table(TableError::NotSingleChar(_))), "{err}");

    let err = LookalikeTable::from_json(r#"{ "x": "y", "y": "z" }"#).unwrap_err();
    assert!(
        matches!(err, Error::Table(TableError::Chained { key: 'x', value: 'y' })),
        "{err}"
    );
    assert!(err.to_string().starts_with("invalid lookalike table: "));

    let err = LookalikeTable::from_json("[1, 2]").unwrap_err();
    assert!(matches!(err, Error::Json(_)), "{err}");
}

#[test]
fn table_errors_convert_with_question_mark() {
    fn build() -> crate::Result<LookalikeTable> {
        Ok(LookalikeTable::new([('Ω', 'O'), ('Ω', '0')])?)
    }
    assert!(matches!(
        build(),
        Err(Error::Table(TableError::Conflict { key: 'Ω', .. }))
    ));
}

#[test]
fn load_missing_file() {
    let err = LookalikeTable::load("/nonexistent/table.json".as_ref()).unwrap_err();
    assert!(matches!(err, Error::Read { .. }));
}
