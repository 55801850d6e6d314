use phf::{Map, phf_map};
use std::fmt;

/// Label assigned to atoms that do not exist in the converted framework.
pub const DELETION_MARKER: &str = "DEL";

/// Intra-unit positions of the two imine nitrogens of a linking unit.
pub const NITROGEN_POSITIONS: [usize; 2] = [10, 11];

/// Number of atoms in a linking unit, and rows in the decision table.
pub const LINKER_POSITIONS: usize = 14;

/// Chemical family of a node (donor-side) unit, read from the last
/// `_`-separated segment of its atom labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MotifFamily {
    /// Triformylphloroglucinol-derived node, keto-enamine linkage (`*_TP`).
    Donor,
    /// Triformylbenzene-derived node, imine linkage (`*_TPB`).
    Acceptor,
}

static FAMILY_BY_SUFFIX: Map<&'static str, MotifFamily> = phf_map! {
    "TP" => MotifFamily::Donor,
    "TPB" => MotifFamily::Acceptor,
};

impl MotifFamily {
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Donor => "TP",
            Self::Acceptor => "TPB",
        }
    }

    /// Classifies a label by its final segment; `None` for labels of other families.
    pub fn of_label(label: &str) -> Option<Self> {
        FAMILY_BY_SUFFIX.get(label_suffix(label)).copied()
    }
}

/// Returns the final `_`-separated segment of a force-field label.
pub fn label_suffix(label: &str) -> &str {
    label.rsplit('_').next().unwrap_or(label)
}

/// Replacement applied to one donor atom when its unit is converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DonorSubstitution {
    pub label: &'static str,
    /// New atomic number, when the element itself changes.
    pub atomic_number: Option<u8>,
}

/// One-to-one donor → acceptor relabelling, keyed by the donor label.
pub static DONOR_SUBSTITUTIONS: Map<&'static str, DonorSubstitution> = phf_map! {
    "C_C3_TP" => DonorSubstitution { label: "C_C3_H3C2N_TPB", atomic_number: None },
    "C_C2O_TP" => DonorSubstitution { label: "C_HC2_C4_TPB", atomic_number: None },
    "O_TP" => DonorSubstitution { label: "H_C_C2_TPB", atomic_number: Some(1) },
    "C_HCN_TP" => DonorSubstitution { label: "C_HCN_C3_TPB", atomic_number: None },
    "H_C_CN_TP" => DonorSubstitution { label: "H_C_CN_TPB", atomic_number: None },
};

/// Neighbour context of a linking unit: the family on the side of nitrogen 10
/// followed by the family on the side of nitrogen 11.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LinkerContext {
    Pa11,
    Pa12,
    Pa21,
    Pa22,
}

impl LinkerContext {
    pub const ALL: [LinkerContext; 4] = [Self::Pa11, Self::Pa12, Self::Pa21, Self::Pa22];

    pub fn from_families(first: MotifFamily, second: MotifFamily) -> Self {
        match (first, second) {
            (MotifFamily::Donor, MotifFamily::Donor) => Self::Pa11,
            (MotifFamily::Donor, MotifFamily::Acceptor) => Self::Pa12,
            (MotifFamily::Acceptor, MotifFamily::Donor) => Self::Pa21,
            (MotifFamily::Acceptor, MotifFamily::Acceptor) => Self::Pa22,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Self::Pa11 => "PA11",
            Self::Pa12 => "PA12",
            Self::Pa21 => "PA21",
            Self::Pa22 => "PA22",
        }
    }

    /// Label suffix carried by the atoms of a unit in this context. The mixed
    /// contexts are mirror images and share the `PA12` parameter set.
    pub fn label_suffix(self) -> &'static str {
        match self {
            Self::Pa21 => "PA12",
            other => other.tag(),
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Looks up the label for intra-unit `position` in this context.
    ///
    /// Returns `None` for positions outside the linking unit.
    pub fn label_for(self, position: usize) -> Option<&'static str> {
        LINKER_DECISIONS.get(position).map(|row| row[self.index()])
    }
}

impl fmt::Display for LinkerContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Linking-unit labels per intra-unit position, columns ordered PA11, PA12, PA21, PA22.
///
/// Positions 0-1 are the ring carbons bonded to nitrogen, 2-5 the ring CH
/// carbons, 6-9 their hydrogens, 10-11 the nitrogens and 12-13 the NH
/// hydrogens, which exist only on the keto-enamine side.
static LINKER_DECISIONS: [[&str; 4]; LINKER_POSITIONS] = [
    ["C_C2N_0_PA11", "C_C2N_H3C3_0_PA12", "C_C2N_H2C3_PA12", "C_C2N_PA22"],
    ["C_C2N_0_PA11", "C_C2N_H2C3_PA12", "C_C2N_H3C3_0_PA12", "C_C2N_PA22"],
    ["C_HC2_HC2N_0_PA11", "C_HC2_HC2N_1_PA12", "C_HC2_HC2N_0_PA12", "C_HC2_PA22"],
    ["C_HC2_HC2N_0_PA11", "C_HC2_HC2N_0_PA12", "C_HC2_HC2N_1_PA12", "C_HC2_PA22"],
    ["C_HC2_HC2N_0_PA11", "C_HC2_HC2N_0_PA12", "C_HC2_HC2N_1_PA12", "C_HC2_PA22"],
    ["C_HC2_HC2N_0_PA11", "C_HC2_HC2N_1_PA12", "C_HC2_HC2N_0_PA12", "C_HC2_PA22"],
    ["H_C_C2_0_PA11", "H_C_C2_1_PA12", "H_C_C2_0_PA12", "H_C_PA22"],
    ["H_C_C2_0_PA11", "H_C_C2_0_PA12", "H_C_C2_1_PA12", "H_C_PA22"],
    ["H_C_C2_0_PA11", "H_C_C2_0_PA12", "H_C_C2_1_PA12", "H_C_PA22"],
    ["H_C_C2_0_PA11", "H_C_C2_1_PA12", "H_C_C2_0_PA12", "H_C_PA22"],
    ["N_0_PA11", "N_HC2_0_PA12", "N_C2_PA12", "N_C2_PA22"],
    ["N_0_PA11", "N_C2_PA12", "N_HC2_0_PA12", "N_C2_PA22"],
    ["H_N_0_PA11", DELETION_MARKER, "H_N_0_PA12", DELETION_MARKER],
    ["H_N_0_PA11", "H_N_0_PA12", DELETION_MARKER, DELETION_MARKER],
];
