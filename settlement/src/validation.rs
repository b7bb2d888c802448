//! Boundary validation
//!
//! Everything here runs before quantization. Malformed shapes, non-numeric or
//! non-finite balances, balances too large for the subunit range and duplicate
//! ids are rejected instead of being coerced, so the engine only ever sees
//! members it can settle.

use serde_json::Value;
use std::collections::HashSet;

use crate::config::Config;
use crate::quantize::Quantizer;
use crate::types::Member;
use crate::{Error, Result};

/// Parse a request body of the form `{ "members": [ { "id": .., "net": .. }, .. ] }`
pub fn parse_request(body: &Value, config: &Config) -> Result<Vec<Member>> {
    let members = body
        .get("members")
        .ok_or_else(|| Error::InvalidInput("members array is required".to_string()))?;
    parse_members(members, config)
}

/// Parse and validate a JSON list of members
pub fn parse_members(value: &Value, config: &Config) -> Result<Vec<Member>> {
    let entries = value
        .as_array()
        .ok_or_else(|| Error::InvalidInput("members array is required".to_string()))?;

    check_count(entries.len(), config.max_members)?;

    let quantizer = Quantizer::new(config.decimal_places);
    let members = entries
        .iter()
        .map(|entry| parse_member(entry).and_then(|m| check_range(m, &quantizer)))
        .collect::<Result<Vec<_>>>()?;

    check_unique(&members)?;
    Ok(members)
}

/// Validate members built by a typed caller
pub fn validate_members(members: &[Member], config: &Config) -> Result<()> {
    check_count(members.len(), config.max_members)?;

    if members.iter().any(|m| m.id.is_empty()) {
        return Err(Error::MissingId);
    }

    let quantizer = Quantizer::new(config.decimal_places);
    if let Some(member) = members.iter().find(|m| quantizer.to_subunits(m.net).is_none()) {
        return Err(Error::AmountOutOfRange {
            id: member.id.clone(),
        });
    }

    check_unique(members)
}

fn parse_member(entry: &Value) -> Result<Member> {
    let fields = entry
        .as_object()
        .ok_or_else(|| Error::InvalidInput("each member must be an object".to_string()))?;

    let id = match fields.get("id").and_then(Value::as_str) {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => return Err(Error::MissingId),
    };

    let net = match fields.get("net") {
        Some(Value::Number(n)) => n.as_f64().ok_or_else(|| Error::InvalidNet { id: id.clone() })?,
        _ => return Err(Error::InvalidNet { id }),
    };

    Member::from_f64(id, net)
}

fn check_range(member: Member, quantizer: &Quantizer) -> Result<Member> {
    match quantizer.to_subunits(member.net) {
        Some(_) => Ok(member),
        None => Err(Error::AmountOutOfRange { id: member.id }),
    }
}

fn check_count(count: usize, max_members: usize) -> Result<()> {
    if count > max_members {
        return Err(Error::TooManyMembers {
            count,
            max: max_members,
        });
    }
    Ok(())
}

fn check_unique(members: &[Member]) -> Result<()> {
    let mut seen = HashSet::with_capacity(members.len());
    for member in members {
        if !seen.insert(member.id.as_str()) {
            return Err(Error::DuplicateId(member.id.clone()));
        }
    }
    Ok(())
}
