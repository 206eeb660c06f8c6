//! Variant category and the category-dependent coordinate fields.
//!
//! [`Coordinates`] is a tagged union so that combinations such as a breakend
//! with a measured length, or an SNV with a mate, cannot be built. On the wire
//! it flattens to the four classic fields `sub_category`, `end`, `length` and
//! `mate_id`, with the numeric sentinels from [`crate::consts`].

use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::{BND_SENTINEL, UNKNOWN_LENGTH_SENTINEL};

/// Point variant (`snv`) or structural variant (`sv`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Snv,
    Sv,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Snv => "snv",
            Category::Sv => "sv",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "snv" => Ok(Category::Snv),
            "sv" => Ok(Category::Sv),
            other => Err(format!("Unknown variant category: {}", other)),
        }
    }
}

///
/// Structural type tag, taken from INFO `SVTYPE` and lower-cased. Tags outside
/// the common set are kept verbatim (lower-cased) in `Other`.
///
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SvType {
    Del,
    Ins,
    Dup,
    Inv,
    Cnv,
    Bnd,
    Other(String),
}

impl SvType {
    pub fn from_tag(tag: &str) -> Self {
        let tag = tag.trim().to_lowercase();
        match tag.as_str() {
            "del" => SvType::Del,
            "ins" => SvType::Ins,
            "dup" => SvType::Dup,
            "inv" => SvType::Inv,
            "cnv" => SvType::Cnv,
            "bnd" => SvType::Bnd,
            _ => SvType::Other(tag),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            SvType::Del => "del",
            SvType::Ins => "ins",
            SvType::Dup => "dup",
            SvType::Inv => "inv",
            SvType::Cnv => "cnv",
            SvType::Bnd => "bnd",
            SvType::Other(tag) => tag,
        }
    }

    /// Breakends are one side of a translocation and have no finite span.
    pub fn is_translocation(&self) -> bool {
        matches!(self, SvType::Bnd)
    }
}

impl Display for SvType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum SubCategory {
    Snv,
    Indel,
    Sv(SvType),
}

impl SubCategory {
    pub fn as_str(&self) -> &str {
        match self {
            SubCategory::Snv => "snv",
            SubCategory::Indel => "indel",
            SubCategory::Sv(sv_type) => sv_type.as_str(),
        }
    }

    pub fn category(&self) -> Category {
        match self {
            SubCategory::Snv | SubCategory::Indel => Category::Snv,
            SubCategory::Sv(_) => Category::Sv,
        }
    }
}

impl Display for SubCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<String> for SubCategory {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "snv" => SubCategory::Snv,
            "indel" => SubCategory::Indel,
            other => SubCategory::Sv(SvType::from_tag(other)),
        }
    }
}

impl From<SubCategory> for String {
    fn from(value: SubCategory) -> Self {
        value.as_str().to_string()
    }
}

/// Span of a non-breakend structural variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SvLength {
    Known(u64),
    /// No `SVLEN` was declared.
    Unknown,
}

impl SvLength {
    pub fn as_i64(&self) -> i64 {
        match self {
            SvLength::Known(len) => i64::try_from(*len).unwrap_or(i64::MAX),
            SvLength::Unknown => UNKNOWN_LENGTH_SENTINEL,
        }
    }
}

///
/// Category-dependent coordinates of a variant. Positions are 1-based and
/// inclusive.
///
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(into = "FlatCoordinates", try_from = "FlatCoordinates")]
pub enum Coordinates {
    /// Single base substitution; always one base long.
    Snv { end: i64 },
    /// Any other point variant: MNV, insertion or deletion.
    Indel { end: i64, length: u64 },
    /// One side of a translocation.
    Breakend { mate_id: Option<String> },
    Structural {
        sv_type: SvType,
        end: i64,
        length: SvLength,
    },
}

impl Coordinates {
    pub fn category(&self) -> Category {
        self.sub_category().category()
    }

    pub fn sub_category(&self) -> SubCategory {
        match self {
            Coordinates::Snv { .. } => SubCategory::Snv,
            Coordinates::Indel { .. } => SubCategory::Indel,
            Coordinates::Breakend { .. } => SubCategory::Sv(SvType::Bnd),
            Coordinates::Structural { sv_type, .. } => SubCategory::Sv(sv_type.clone()),
        }
    }

    /// End position; [`BND_SENTINEL`] for breakends.
    pub fn end(&self) -> i64 {
        match self {
            Coordinates::Snv { end }
            | Coordinates::Indel { end, .. }
            | Coordinates::Structural { end, .. } => *end,
            Coordinates::Breakend { .. } => BND_SENTINEL,
        }
    }

    /// Length; [`BND_SENTINEL`] for breakends and [`UNKNOWN_LENGTH_SENTINEL`]
    /// for structural variants without a declared length.
    pub fn length(&self) -> i64 {
        match self {
            Coordinates::Snv { .. } => 1,
            Coordinates::Indel { length, .. } => i64::try_from(*length).unwrap_or(i64::MAX),
            Coordinates::Breakend { .. } => BND_SENTINEL,
            Coordinates::Structural { length, .. } => length.as_i64(),
        }
    }

    pub fn mate_id(&self) -> Option<&str> {
        match self {
            Coordinates::Breakend { mate_id } => mate_id.as_deref(),
            _ => None,
        }
    }
}

/// Wire shape of [`Coordinates`].
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FlatCoordinates {
    pub sub_category: SubCategory,
    pub end: i64,
    pub length: i64,
    #[serde(default)]
    pub mate_id: Option<String>,
}

impl From<Coordinates> for FlatCoordinates {
    fn from(value: Coordinates) -> Self {
        FlatCoordinates {
            sub_category: value.sub_category(),
            end: value.end(),
            length: value.length(),
            mate_id: value.mate_id().map(str::to_string),
        }
    }
}

impl TryFrom<FlatCoordinates> for Coordinates {
    type Error = String;

    fn try_from(value: FlatCoordinates) -> Result<Self, Self::Error> {
        if value.mate_id.is_some() && value.sub_category != SubCategory::Sv(SvType::Bnd) {
            return Err(format!(
                "mate_id is only valid for breakends, not {}",
                value.sub_category
            ));
        }
        match value.sub_category {
            SubCategory::Snv => Ok(Coordinates::Snv { end: value.end }),
            SubCategory::Indel => {
                let length = u64::try_from(value.length)
                    .map_err(|_| format!("negative indel length: {}", value.length))?;
                Ok(Coordinates::Indel {
                    end: value.end,
                    length,
                })
            }
            SubCategory::Sv(SvType::Bnd) => Ok(Coordinates::Breakend {
                mate_id: value.mate_id,
            }),
            SubCategory::Sv(sv_type) => {
                let length = match value.length {
                    UNKNOWN_LENGTH_SENTINEL => SvLength::Unknown,
                    len => SvLength::Known(
                        u64::try_from(len).map_err(|_| format!("invalid sv length: {}", len))?,
                    ),
                };
                Ok(Coordinates::Structural {
                    sv_type,
                    end: value.end,
                    length,
                })
            }
        }
    }
}
