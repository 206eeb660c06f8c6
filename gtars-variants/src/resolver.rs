//! Coordinate resolution: end position, length, sub-category and mate of a
//! variant, from its alleles and its structural INFO annotation.

use crate::errors::MalformedReason;
use crate::models::{Category, Coordinates, SvLength, SvType};

///
/// Structural INFO fields, already reduced to their first value.
///
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SvAnnotation<'a> {
    /// `SVTYPE`
    pub sv_type: Option<&'a str>,
    /// `SVLEN`, signed: deletions are usually negative.
    pub sv_len: Option<i64>,
    /// `END`
    pub end: Option<i64>,
    /// `MATEID`
    pub mate_id: Option<&'a str>,
}

fn resolve_point(
    reference: &str,
    alternative: &str,
    position: i64,
) -> Result<Coordinates, MalformedReason> {
    let ref_len = reference.len() as u64;
    let alt_len = alternative.len() as u64;

    if ref_len == 1 && alt_len == 1 {
        return Ok(Coordinates::Snv { end: position });
    }

    let length = if ref_len == alt_len {
        ref_len
    } else {
        ref_len.abs_diff(alt_len)
    };

    // end must fit in an i64
    let end = i64::try_from(ref_len.max(alt_len))
        .ok()
        .and_then(|span| position.checked_add(span - 1))
        .ok_or_else(|| MalformedReason::InvalidPosition(position.to_string()))?;

    Ok(Coordinates::Indel { end, length })
}

fn resolve_structural(position: i64, sv: &SvAnnotation) -> Result<Coordinates, MalformedReason> {
    let sv_type = SvType::from_tag(sv.sv_type.ok_or(MalformedReason::MissingSvType)?);

    // breakends ignore SVLEN and END
    if sv_type.is_translocation() {
        return Ok(Coordinates::Breakend {
            mate_id: sv.mate_id.map(str::to_string),
        });
    }

    let end = sv
        .end
        .ok_or_else(|| MalformedReason::MissingEnd(sv_type.to_string()))?;
    if end < position {
        return Err(MalformedReason::EndBeforePosition { end });
    }

    let length = match sv.sv_len.and_then(i64::checked_abs) {
        Some(len) => SvLength::Known(len as u64),
        None => SvLength::Unknown,
    };

    Ok(Coordinates::Structural {
        sv_type,
        end,
        length,
    })
}

///
/// Resolve the coordinates of a variant.
///
/// Point variants are classified from their allele lengths alone; the
/// structural annotation is ignored. Structural variants must declare a type,
/// and every type but a breakend must also declare an end.
///
/// # Arguments
/// * `reference` - REF allele
/// * `alternative` - ALT allele
/// * `position` - 1-based POS
/// * `category` - category decided by the caller
/// * `sv` - structural INFO fields
///
pub fn resolve_coordinates(
    reference: &str,
    alternative: &str,
    position: i64,
    category: Category,
    sv: &SvAnnotation,
) -> Result<Coordinates, MalformedReason> {
    match category {
        Category::Snv => resolve_point(reference, alternative, position),
        Category::Sv => resolve_structural(position, sv),
    }
}
