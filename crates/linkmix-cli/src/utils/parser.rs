use std::ops::Deref;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Index list is empty. Expected comma-separated indices such as '3,17,40'.")]
    Empty,

    #[error("Invalid index '{0}'. Expected a non-negative integer.")]
    InvalidIndex(String),

    #[error("Invalid range '{0}'. Expected 'start-end' with start <= end (e.g., '0-9').")]
    InvalidRange(String),

    #[error("Range '{range}' spans more than {max} indices.")]
    RangeTooLong { range: String, max: usize },
}

/// Largest number of indices a single `start-end` range may expand to.
pub const MAX_RANGE_LEN: usize = 1 << 20;

/// Comma-separated list of indices given on the command line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IndexList(Vec<usize>);

impl IndexList {
    pub fn into_inner(self) -> Vec<usize> {
        self.0
    }
}

impl Deref for IndexList {
    type Target = [usize];

    fn deref(&self) -> &[usize] {
        &self.0
    }
}

fn parse_index(token: &str) -> Result<usize, ParseError> {
    token
        .parse()
        .map_err(|_| ParseError::InvalidIndex(token.to_string()))
}

/// Parses lists such as `3,17,40` or `0-9,20`. Ranges are inclusive; order
/// and repetitions are preserved.
pub fn parse_index_list(input: &str) -> Result<IndexList, ParseError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ParseError::Empty);
    }

    let mut indices = Vec::new();
    for token in input.split(',').map(str::trim) {
        match token.split_once('-') {
            Some((start, end)) => {
                let (start, end) = (start.trim(), end.trim());
                let (Ok(first), Ok(last)) = (start.parse::<usize>(), end.parse::<usize>()) else {
                    return Err(ParseError::InvalidRange(token.to_string()));
                };
                if first > last {
                    return Err(ParseError::InvalidRange(token.to_string()));
                }
                if last - first >= MAX_RANGE_LEN {
                    return Err(ParseError::RangeTooLong {
                        range: token.to_string(),
                        max: MAX_RANGE_LEN,
                    });
                }
                indices.extend(first..=last);
            }
            None => indices.push(parse_index(token)?),
        }
    }
    Ok(IndexList(indices))
}
