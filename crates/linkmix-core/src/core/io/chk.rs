use crate::core::io::traits::StructureFile;
use crate::core::models::cell::Cell;
use crate::core::models::structure::{Structure, StructureError};
use crate::core::models::topology::Bond;
use nalgebra::Point3;
use std::collections::{BTreeMap, HashMap};
use std::io::{self, BufRead, Write};
use thiserror::Error;

const KEY_WIDTH: usize = 40;
const VALUES_PER_LINE: usize = 4;

/// A single typed value stored in a checkpoint file.
#[derive(Debug, Clone, PartialEq)]
pub enum ChkValue {
    Str(String),
    Bool(bool),
    Int(i64),
    Float(f64),
    IntArray { shape: Vec<usize>, data: Vec<i64> },
    FloatArray { shape: Vec<usize>, data: Vec<f64> },
    StrArray { shape: Vec<usize>, data: Vec<String> },
    None,
}

impl ChkValue {
    fn kind(&self) -> &'static str {
        match self {
            Self::Str(_) => "str",
            Self::Bool(_) => "bln",
            Self::Int(_) => "int",
            Self::Float(_) => "flt",
            Self::IntArray { .. } => "intar",
            Self::FloatArray { .. } => "fltar",
            Self::StrArray { .. } => "strar",
            Self::None => "none",
        }
    }
}

/// Checkpoint records that are not part of the [`Structure`] model
/// (e.g. masses, charges, titles), kept verbatim so they can be written back.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChkMetadata {
    pub records: BTreeMap<String, ChkValue>,
}

#[derive(Debug, Error)]
pub enum ChkError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: ChkParseErrorKind },
    #[error("Missing required record: {0}")]
    MissingRecord(String),
    #[error("Inconsistent data: {0}")]
    Inconsistency(String),
    #[error("Invalid structure: {0}")]
    Structure(#[from] StructureError),
}

#[derive(Debug, Error)]
pub enum ChkParseErrorKind {
    #[error("Record header must look like '<key> kind=<kind> <value>'")]
    MalformedHeader,
    #[error("Unknown record kind '{0}'")]
    UnknownKind(String),
    #[error("Invalid integer value '{0}'")]
    InvalidInt(String),
    #[error("Invalid float value '{0}'")]
    InvalidFloat(String),
    #[error("Invalid boolean value '{0}'")]
    InvalidBool(String),
    #[error("Invalid array shape '{0}'")]
    InvalidShape(String),
    #[error("Array record '{key}' ended after {found} of {expected} values")]
    TruncatedArray {
        key: String,
        expected: usize,
        found: usize,
    },
    #[error("Array record '{key}' has {extra} trailing values on its last line")]
    TrailingValues { key: String, extra: usize },
}

/// The plain-text checkpoint format used for framework snapshots.
///
/// Each record starts with a header line holding the key (padded to 40
/// columns), the value kind and either the scalar value or the array shape.
/// Array values follow on subsequent lines as whitespace-separated tokens.
pub struct ChkFile;

impl StructureFile for ChkFile {
    type Metadata = ChkMetadata;
    type Error = ChkError;

    fn read_from(reader: &mut impl BufRead) -> Result<(Structure, Self::Metadata), Self::Error> {
        let records = read_records(reader)?;
        into_structure(records)
    }

    fn write_to(
        structure: &Structure,
        metadata: &Self::Metadata,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error> {
        let mut records = metadata.records.clone();
        records.extend(structure_records(structure));
        for (key, value) in &records {
            write_record(writer, key, value)?;
        }
        Ok(())
    }

    fn write_system_to(structure: &Structure, writer: &mut impl Write) -> Result<(), Self::Error> {
        Self::write_to(structure, &ChkMetadata::default(), writer)
    }
}

fn read_records(reader: &mut impl BufRead) -> Result<BTreeMap<String, ChkValue>, ChkError> {
    let lines = reader.lines().collect::<Result<Vec<_>, _>>()?;
    let mut records = BTreeMap::new();
    let mut cursor = 0;

    while cursor < lines.len() {
        let line_num = cursor + 1;
        let line = &lines[cursor];
        cursor += 1;
        if line.trim().is_empty() {
            continue;
        }

        let parse_err = |kind| ChkError::Parse {
            line: line_num,
            kind,
        };
        let kind_pos = line
            .find("kind=")
            .ok_or_else(|| parse_err(ChkParseErrorKind::MalformedHeader))?;
        let key = line[..kind_pos].trim();
        if key.is_empty() {
            return Err(parse_err(ChkParseErrorKind::MalformedHeader));
        }
        let after = &line[kind_pos + "kind=".len()..];
        let (kind, rest) = match after.split_once(char::is_whitespace) {
            Some((kind, rest)) => (kind, rest.trim()),
            None => (after.trim(), ""),
        };

        let value = match kind {
            "str" => ChkValue::Str(rest.to_string()),
            "bln" => ChkValue::Bool(parse_bool(rest).map_err(parse_err)?),
            "int" => ChkValue::Int(parse_int(rest).map_err(parse_err)?),
            "flt" => ChkValue::Float(parse_float(rest).map_err(parse_err)?),
            "none" => ChkValue::None,
            "intar" | "fltar" | "strar" => {
                let shape = parse_shape(rest).map_err(parse_err)?;
                let expected: usize = shape.iter().product();
                let tokens = collect_tokens(&lines, &mut cursor, key, expected)?;
                match kind {
                    "intar" => ChkValue::IntArray {
                        shape,
                        data: tokens
                            .iter()
                            .map(|t| parse_int(t))
                            .collect::<Result<_, _>>()
                            .map_err(parse_err)?,
                    },
                    "fltar" => ChkValue::FloatArray {
                        shape,
                        data: tokens
                            .iter()
                            .map(|t| parse_float(t))
                            .collect::<Result<_, _>>()
                            .map_err(parse_err)?,
                    },
                    _ => ChkValue::StrArray {
                        shape,
                        data: tokens.iter().map(|t| t.to_string()).collect(),
                    },
                }
            }
            other => return Err(parse_err(ChkParseErrorKind::UnknownKind(other.to_string()))),
        };
        records.insert(key.to_string(), value);
    }

    Ok(records)
}

fn collect_tokens<'a>(
    lines: &'a [String],
    cursor: &mut usize,
    key: &str,
    expected: usize,
) -> Result<Vec<&'a str>, ChkError> {
    let mut tokens = Vec::with_capacity(expected);
    while tokens.len() < expected {
        let Some(line) = lines.get(*cursor) else {
            return Err(ChkError::Parse {
                line: *cursor,
                kind: ChkParseErrorKind::TruncatedArray {
                    key: key.to_string(),
                    expected,
                    found: tokens.len(),
                },
            });
        };
        *cursor += 1;
        tokens.extend(line.split_whitespace());
    }
    if tokens.len() > expected {
        return Err(ChkError::Parse {
            line: *cursor,
            kind: ChkParseErrorKind::TrailingValues {
                key: key.to_string(),
                extra: tokens.len() - expected,
            },
        });
    }
    Ok(tokens)
}

fn parse_int(s: &str) -> Result<i64, ChkParseErrorKind> {
    s.trim()
        .parse()
        .map_err(|_| ChkParseErrorKind::InvalidInt(s.to_string()))
}

fn parse_float(s: &str) -> Result<f64, ChkParseErrorKind> {
    s.trim()
        .parse()
        .map_err(|_| ChkParseErrorKind::InvalidFloat(s.to_string()))
}

fn parse_bool(s: &str) -> Result<bool, ChkParseErrorKind> {
    match s.trim() {
        "True" | "true" | "1" => Ok(true),
        "False" | "false" | "0" => Ok(false),
        other => Err(ChkParseErrorKind::InvalidBool(other.to_string())),
    }
}

fn parse_shape(s: &str) -> Result<Vec<usize>, ChkParseErrorKind> {
    let shape: Vec<usize> = s
        .split(',')
        .map(|dim| dim.trim().parse())
        .collect::<Result<_, _>>()
        .map_err(|_| ChkParseErrorKind::InvalidShape(s.to_string()))?;
    if shape.is_empty() {
        return Err(ChkParseErrorKind::InvalidShape(s.to_string()));
    }
    Ok(shape)
}

fn into_structure(
    mut records: BTreeMap<String, ChkValue>,
) -> Result<(Structure, ChkMetadata), ChkError> {
    let numbers: Vec<u8> = match records.remove("numbers") {
        Some(ChkValue::IntArray { data, .. }) => data
            .iter()
            .map(|&z| {
                u8::try_from(z).map_err(|_| {
                    ChkError::Inconsistency(format!("Atomic number {} is out of range", z))
                })
            })
            .collect::<Result<_, _>>()?,
        Some(_) => return Err(wrong_kind("numbers", "intar")),
        None => return Err(ChkError::MissingRecord("numbers".into())),
    };
    let natom = numbers.len();

    let positions: Vec<Point3<f64>> = match records.remove("pos") {
        Some(ChkValue::FloatArray { shape, data }) => {
            if shape != [natom, 3] {
                return Err(ChkError::Inconsistency(format!(
                    "Record 'pos' has shape {:?}, expected [{}, 3]",
                    shape, natom
                )));
            }
            data.chunks_exact(3)
                .map(|xyz| Point3::new(xyz[0], xyz[1], xyz[2]))
                .collect()
        }
        Some(_) => return Err(wrong_kind("pos", "fltar")),
        None => return Err(ChkError::MissingRecord("pos".into())),
    };

    let ffatypes = read_ffatypes(
        records.remove("ffatypes"),
        records.remove("ffatype_ids"),
        natom,
    )?;

    let bonds: Vec<Bond> = match records.remove("bonds") {
        Some(ChkValue::IntArray { shape, data }) => {
            if shape.len() != 2 || shape[1] != 2 {
                return Err(ChkError::Inconsistency(format!(
                    "Record 'bonds' has shape {:?}, expected [n, 2]",
                    shape
                )));
            }
            data.chunks_exact(2)
                .map(|pair| -> Result<Bond, ChkError> {
                    Ok(Bond::new(to_index(pair[0])?, to_index(pair[1])?))
                })
                .collect::<Result<_, _>>()?
        }
        Some(_) => return Err(wrong_kind("bonds", "intar")),
        None => Vec::new(),
    };

    let cell = match records.remove("rvecs") {
        Some(ChkValue::FloatArray { shape, data }) => match shape.as_slice() {
            [0, 3] | [0] => None,
            [3, 3] => Some(Cell::from_rows([
                [data[0], data[1], data[2]],
                [data[3], data[4], data[5]],
                [data[6], data[7], data[8]],
            ])),
            _ => {
                return Err(ChkError::Inconsistency(format!(
                    "Record 'rvecs' has shape {:?}; only fully periodic cells are supported",
                    shape
                )));
            }
        },
        Some(_) => return Err(wrong_kind("rvecs", "fltar")),
        None => None,
    };

    let structure = Structure::new(numbers, positions, ffatypes, bonds, cell)?;
    Ok((structure, ChkMetadata { records }))
}

fn read_ffatypes(
    ffatypes: Option<ChkValue>,
    ffatype_ids: Option<ChkValue>,
    natom: usize,
) -> Result<Vec<String>, ChkError> {
    let unique = match ffatypes {
        Some(ChkValue::StrArray { data, .. }) => data,
        Some(_) => return Err(wrong_kind("ffatypes", "strar")),
        None => return Err(ChkError::MissingRecord("ffatypes".into())),
    };

    match ffatype_ids {
        Some(ChkValue::IntArray { data, .. }) => {
            if data.len() != natom {
                return Err(ChkError::Inconsistency(format!(
                    "Record 'ffatype_ids' has {} entries for {} atoms",
                    data.len(),
                    natom
                )));
            }
            data.iter()
                .map(|&id| {
                    to_index(id).and_then(|id| {
                        unique.get(id).cloned().ok_or_else(|| {
                            ChkError::Inconsistency(format!(
                                "ffatype id {} exceeds the {} declared ffatypes",
                                id,
                                unique.len()
                            ))
                        })
                    })
                })
                .collect()
        }
        Some(_) => Err(wrong_kind("ffatype_ids", "intar")),
        // Without ids, the labels are stored per atom.
        None if unique.len() == natom => Ok(unique),
        None => Err(ChkError::MissingRecord("ffatype_ids".into())),
    }
}

fn to_index(value: i64) -> Result<usize, ChkError> {
    usize::try_from(value)
        .map_err(|_| ChkError::Inconsistency(format!("Negative atom index {}", value)))
}

fn wrong_kind(key: &str, expected: &str) -> ChkError {
    ChkError::Inconsistency(format!("Record '{}' must be of kind '{}'", key, expected))
}

fn structure_records(structure: &Structure) -> BTreeMap<String, ChkValue> {
    let natom = structure.natom();
    let mut records = BTreeMap::new();

    records.insert(
        "numbers".to_string(),
        ChkValue::IntArray {
            shape: vec![natom],
            data: structure.numbers().iter().map(|&z| i64::from(z)).collect(),
        },
    );
    records.insert(
        "pos".to_string(),
        ChkValue::FloatArray {
            shape: vec![natom, 3],
            data: structure
                .positions()
                .iter()
                .flat_map(|p| [p.x, p.y, p.z])
                .collect(),
        },
    );

    let mut unique: Vec<String> = Vec::new();
    let mut ids_by_label: HashMap<&str, i64> = HashMap::new();
    let mut ids = Vec::with_capacity(natom);
    for label in structure.ffatypes() {
        let id = *ids_by_label.entry(label.as_str()).or_insert_with(|| {
            unique.push(label.clone());
            (unique.len() - 1) as i64
        });
        ids.push(id);
    }
    records.insert(
        "ffatypes".to_string(),
        ChkValue::StrArray {
            shape: vec![unique.len()],
            data: unique,
        },
    );
    records.insert(
        "ffatype_ids".to_string(),
        ChkValue::IntArray {
            shape: vec![natom],
            data: ids,
        },
    );

    records.insert(
        "bonds".to_string(),
        ChkValue::IntArray {
            shape: vec![structure.bonds().len(), 2],
            data: structure
                .bonds()
                .iter()
                .flat_map(|b| [b.i as i64, b.j as i64])
                .collect(),
        },
    );

    if let Some(cell) = structure.cell() {
        records.insert(
            "rvecs".to_string(),
            ChkValue::FloatArray {
                shape: vec![3, 3],
                data: cell.to_rows().iter().flatten().copied().collect(),
            },
        );
    }

    records
}

fn write_record(writer: &mut impl Write, key: &str, value: &ChkValue) -> Result<(), ChkError> {
    if key.len() > KEY_WIDTH || key.contains(char::is_whitespace) || key.contains("kind=") {
        return Err(ChkError::Inconsistency(format!(
            "Record key '{}' cannot be stored in a checkpoint file",
            key
        )));
    }

    let shape_str = |shape: &[usize]| {
        shape
            .iter()
            .map(usize::to_string)
            .collect::<Vec<_>>()
            .join(",")
    };

    match value {
        ChkValue::Str(s) => {
            if s.contains('\n') {
                return Err(ChkError::Inconsistency(format!(
                    "String record '{}' contains a newline",
                    key
                )));
            }
            write_header(writer, key, value.kind(), s)?;
        }
        ChkValue::Bool(b) => write_header(writer, key, value.kind(), if *b { "True" } else { "False" })?,
        ChkValue::Int(i) => write_header(writer, key, value.kind(), &i.to_string())?,
        ChkValue::Float(f) => write_header(writer, key, value.kind(), &format!("{:.16e}", f))?,
        ChkValue::None => write_header(writer, key, value.kind(), "")?,
        ChkValue::IntArray { shape, data } => {
            write_header(writer, key, value.kind(), &shape_str(shape))?;
            write_values(writer, data.iter().map(|v| format!("{:>20}", v)))?;
        }
        ChkValue::FloatArray { shape, data } => {
            write_header(writer, key, value.kind(), &shape_str(shape))?;
            write_values(writer, data.iter().map(|v| format!("{:>24.16e}", v)))?;
        }
        ChkValue::StrArray { shape, data } => {
            if let Some(bad) = data
                .iter()
                .find(|s| s.is_empty() || s.contains(char::is_whitespace))
            {
                return Err(ChkError::Inconsistency(format!(
                    "String array '{}' contains the unstorable entry '{}'",
                    key, bad
                )));
            }
            write_header(writer, key, value.kind(), &shape_str(shape))?;
            write_values(writer, data.iter().map(|v| format!("{:>22}", v)))?;
        }
    }
    Ok(())
}

fn write_header(writer: &mut impl Write, key: &str, kind: &str, rest: &str) -> io::Result<()> {
    writeln!(writer, "{:<width$} kind={} {}", key, kind, rest, width = KEY_WIDTH)
}

fn write_values(writer: &mut impl Write, values: impl Iterator<Item = String>) -> io::Result<()> {
    let values: Vec<String> = values.collect();
    for line in values.chunks(VALUES_PER_LINE) {
        writeln!(writer, "{}", line.join(" "))?;
    }
    Ok(())
}
