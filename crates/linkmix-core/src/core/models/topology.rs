use std::fmt;

/// An unordered covalent bond between two atoms, addressed by atom index.
///
/// The endpoints are normalised on construction so that `i <= j`, which makes
/// two bonds over the same atom pair compare equal regardless of the order in
/// which they were listed in the source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Bond {
    pub i: usize, // Lower atom index
    pub j: usize, // Higher atom index
}

impl Bond {
    pub fn new(idx1: usize, idx2: usize) -> Self {
        if idx1 <= idx2 {
            Self { i: idx1, j: idx2 }
        } else {
            Self { i: idx2, j: idx1 }
        }
    }

    pub fn as_pair(&self) -> (usize, usize) {
        (self.i, self.j)
    }
}

impl fmt::Display for Bond {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.i, self.j)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bond_new_normalises_endpoint_order() {
        let bond = Bond::new(7, 3);
        assert_eq!(bond.i, 3);
        assert_eq!(bond.j, 7);
        assert_eq!(bond, Bond::new(3, 7));
    }

    #[test]
    fn as_pair_returns_sorted_endpoints() {
        assert_eq!(Bond::new(9, 4).as_pair(), (4, 9));
    }

    #[test]
    fn bond_display_uses_dash_separator() {
        assert_eq!(Bond::new(2, 1).to_string(), "1-2");
    }
}
