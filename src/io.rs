//! Line-oriented input loaders.
//!
//! Three `;`-delimited flat-file formats feed a roster period: shift-type
//! templates, the nurse roster, and request/rule files (a general file and
//! a period file, concatenated in order). Blank lines and lines starting
//! with `#` are skipped; tabs and surrounding whitespace inside fields are
//! stripped before parsing. Any malformed numeric or date field fails the
//! whole load with the offending line — there is no partial roster.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;
use tracing::info;

use crate::calendar::weekday_from_label;
use crate::models::{Nurse, RosterRule, ShiftType};

/// Errors raised while loading input files.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file is missing or unreadable.
    #[error("cannot read {path}: {source}")]
    Io {
        /// Offending path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A record failed to parse.
    #[error("{path}:{line_no}: malformed record `{line}`: {reason}")]
    Malformed {
        /// Offending path.
        path: PathBuf,
        /// 1-based line number.
        line_no: usize,
        /// The raw line content.
        line: String,
        /// What failed.
        reason: String,
    },
}

/// Loads shift-type templates.
///
/// Record: `name;abbreviation;start HH.MM;end HH.MM;count`.
pub fn load_shift_types(path: impl AsRef<Path>) -> Result<Vec<ShiftType>, LoadError> {
    let path = path.as_ref();
    let mut types = Vec::new();
    for (line_no, line) in read_records(path)? {
        types.push(
            parse_shift_type(&line)
                .map_err(|reason| malformed(path, line_no, &line, reason))?,
        );
    }
    info!(count = types.len(), path = %path.display(), "loaded shift types");
    Ok(types)
}

/// Loads the nurse roster.
///
/// Record: `name;contract hours;level;external;head nurse;resuscitation`.
/// The three flags are presence-truthy: any non-blank token sets them.
pub fn load_nurses(path: impl AsRef<Path>) -> Result<Vec<Nurse>, LoadError> {
    let path = path.as_ref();
    let mut nurses = Vec::new();
    for (line_no, line) in read_records(path)? {
        nurses.push(
            parse_nurse(&line).map_err(|reason| malformed(path, line_no, &line, reason))?,
        );
    }
    info!(count = nurses.len(), path = %path.display(), "loaded nurses");
    Ok(nurses)
}

/// Loads rule records from one or more files, concatenated in order.
///
/// Record: up to nine positional fields — `name;date;weekday;shift;assign;
/// streak min;streak max;aggregate max;hard` — any of which may be blank.
/// Blankness is preserved: classification happens downstream on the
/// populated-field pattern.
pub fn load_rules<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<RosterRule>, LoadError> {
    let mut rules = Vec::new();
    for path in paths {
        let path = path.as_ref();
        for (line_no, line) in read_records(path)? {
            rules.push(
                parse_rule(&line).map_err(|reason| malformed(path, line_no, &line, reason))?,
            );
        }
    }
    info!(count = rules.len(), "loaded rules");
    Ok(rules)
}

/// Reads a file into (line number, content) records, skipping blank and
/// comment lines.
fn read_records(path: &Path) -> Result<Vec<(usize, String)>, LoadError> {
    let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(content
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.to_string()))
        .filter(|(_, line)| !line.trim().is_empty() && !line.starts_with('#'))
        .collect())
}

fn malformed(path: &Path, line_no: usize, line: &str, reason: String) -> LoadError {
    LoadError::Malformed {
        path: path.to_path_buf(),
        line_no,
        line: line.to_string(),
        reason,
    }
}

/// Strips tabs and surrounding whitespace; inner spaces survive (names).
fn clean_name(field: &str) -> String {
    field.replace('\t', "").trim().to_string()
}

/// Strips all whitespace from a field.
fn clean_token(field: &str) -> String {
    field.split_whitespace().collect()
}

fn parse_time(token: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(token, "%H.%M")
        .map_err(|e| format!("bad time-of-day `{token}`: {e}"))
}

fn parse_shift_type(line: &str) -> Result<ShiftType, String> {
    let fields: Vec<&str> = line.split(';').collect();
    if fields.len() < 5 {
        return Err(format!("expected 5 fields, found {}", fields.len()));
    }
    let count: u32 = clean_token(fields[4])
        .parse()
        .map_err(|e| format!("bad count: {e}"))?;
    Ok(ShiftType::new(
        clean_name(fields[0]),
        clean_token(fields[1]),
        parse_time(&clean_token(fields[2]))?,
        parse_time(&clean_token(fields[3]))?,
        count,
    ))
}

fn parse_nurse(line: &str) -> Result<Nurse, String> {
    let fields: Vec<&str> = line.split(';').collect();
    if fields.len() < 6 {
        return Err(format!("expected 6 fields, found {}", fields.len()));
    }
    let contract: f64 = clean_token(fields[1])
        .parse()
        .map_err(|e| format!("bad contract hours: {e}"))?;
    let level: i32 = clean_token(fields[2])
        .parse()
        .map_err(|e| format!("bad level: {e}"))?;

    let mut nurse = Nurse::new(clean_name(fields[0]), contract).with_level(level);
    nurse.external = !clean_token(fields[3]).is_empty();
    nurse.head_nurse = !clean_token(fields[4]).is_empty();
    nurse.resuscitation = !clean_token(fields[5]).is_empty();
    Ok(nurse)
}

fn parse_rule(line: &str) -> Result<RosterRule, String> {
    let mut rule = RosterRule::new();
    for (i, field) in line.split(';').enumerate() {
        let token = clean_token(field);
        if token.is_empty() {
            continue;
        }
        match i {
            0 => rule.nurse = Some(token),
            1 => {
                rule.date = Some(
                    NaiveDate::parse_from_str(&token, "%m-%d-%Y")
                        .map_err(|e| format!("bad date `{token}`: {e}"))?,
                )
            }
            2 => {
                rule.weekday = Some(
                    weekday_from_label(&token)
                        .ok_or_else(|| format!("unknown weekday label `{token}`"))?,
                )
            }
            3 => rule.shift = Some(token),
            4 => rule.assign = Some(parse_flag(&token)?),
            5 => {
                rule.streak_min =
                    Some(token.parse().map_err(|e| format!("bad streak min: {e}"))?)
            }
            6 => {
                rule.streak_max =
                    Some(token.parse().map_err(|e| format!("bad streak max: {e}"))?)
            }
            7 => {
                rule.max_total =
                    Some(token.parse().map_err(|e| format!("bad aggregate max: {e}"))?)
            }
            8 => rule.hard = Some(parse_flag(&token)?),
            _ => return Err(format!("unexpected extra field `{token}`")),
        }
    }
    Ok(rule)
}

fn parse_flag(token: &str) -> Result<bool, String> {
    match token {
        "1" => Ok(true),
        "0" => Ok(false),
        other => Err(format!("bad flag `{other}`, expected 0 or 1")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RuleKind;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_shift_types() {
        let file = write_file(
            "# templates\n\
             dag kort;\tdk ;08.00;16.00;1\n\
             \n\
             nacht;n;23.00;07.00;2\n",
        );
        let types = load_shift_types(file.path()).unwrap();

        assert_eq!(types.len(), 2);
        assert_eq!(types[0].name, "dag kort");
        assert_eq!(types[0].abbreviation, "dk");
        assert_eq!(types[0].start_time, NaiveTime::from_hms_opt(8, 0, 0).unwrap());
        assert_eq!(types[1].count, 2);
        assert!(types[1].is_night());
    }

    #[test]
    fn test_load_shift_types_bad_count() {
        let file = write_file("nacht;n;23.00;07.00;two\n");
        let err = load_shift_types(file.path()).unwrap_err();
        match err {
            LoadError::Malformed { line, reason, .. } => {
                assert!(line.contains("nacht"));
                assert!(reason.contains("bad count"));
            }
            other => panic!("expected Malformed, got {other:?}"),
        }
    }

    #[test]
    fn test_load_shift_types_missing_file() {
        let err = load_shift_types("/nonexistent/templates.csv").unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn test_load_nurses_flags_are_presence_truthy() {
        let file = write_file(
            "Alice;36.0;3;;;x\n\
             Bob; 24 ;1;zzp;;\n",
        );
        let nurses = load_nurses(file.path()).unwrap();

        assert_eq!(nurses.len(), 2);
        assert_eq!(nurses[0].name, "Alice");
        assert!(!nurses[0].external);
        assert!(nurses[0].resuscitation);
        assert!((nurses[1].contract_hours - 24.0).abs() < 1e-10);
        assert!(nurses[1].external);
        assert!(!nurses[1].resuscitation);
    }

    #[test]
    fn test_load_nurses_bad_contract() {
        let file = write_file("Alice;lots;3;;;\n");
        assert!(matches!(
            load_nurses(file.path()).unwrap_err(),
            LoadError::Malformed { .. }
        ));
    }

    #[test]
    fn test_load_rules_preserves_blanks_and_order() {
        let general = write_file("Carol;;;n;0;;;;1\n");
        let period = write_file(
            "# period requests\n\
             Alice;03-10-2024;;;1;;;;1\n\
             Bob;;ma;;0;;;;1\n",
        );
        let rules = load_rules(&[general.path(), period.path()]).unwrap();

        assert_eq!(rules.len(), 3);
        assert_eq!(rules[0].classify().unwrap(), RuleKind::ShiftTypeExclusion);
        assert_eq!(rules[1].classify().unwrap(), RuleKind::ExactDate);
        assert_eq!(
            rules[1].date,
            Some(NaiveDate::from_ymd_opt(2024, 3, 10).unwrap())
        );
        assert_eq!(rules[2].classify().unwrap(), RuleKind::WeekdayRecurring);
        assert_eq!(rules[2].weekday, Some(chrono::Weekday::Mon));
    }

    #[test]
    fn test_load_rules_bad_date_is_fatal() {
        let file = write_file("Alice;2024-03-10;;;1;;;;1\n");
        let err = load_rules(&[file.path()]).unwrap_err();
        match err {
            LoadError::Malformed { line_no, reason, .. } => {
                assert_eq!(line_no, 1);
                assert!(reason.contains("bad date"));
            }
            other => panic!("expected Malformed, got {other:?}"),
        }
    }

    #[test]
    fn test_load_rules_strips_tabs_and_spaces() {
        let file = write_file("Dave;\t;\t; n ;0;;4;;1\n");
        let rules = load_rules(&[file.path()]).unwrap();
        assert_eq!(rules[0].shift.as_deref(), Some("n"));
        assert_eq!(rules[0].streak_max, Some(4));
    }
}
