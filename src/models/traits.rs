use crate::models::basic::StringOrInt;
use crate::models::toncenter_v3::{StackItemType, V2StackEntity};
use crate::provider::ProviderError;
use crate::tvm::{StackEntry, base64_to_boc, boc_to_base64};
use num_bigint::{BigInt, Sign};


impl TryFrom<&StackEntry> for V2StackEntity {
    type Error = ProviderError;

    fn try_from(entry: &StackEntry) -> Result<Self, Self::Error> {
        let (r#type, value) = match entry {
            StackEntry::Num(n) => (StackItemType::Num, num_to_hex(n)),
            StackEntry::Cell(c) => (StackItemType::Cell, boc_to_base64(c)?),
            StackEntry::Slice(c) => (StackItemType::Slice, boc_to_base64(c)?),
        };
        Ok(V2StackEntity {
            r#type: Some(r#type),
            value: Some(StringOrInt::String(value)),
        })
    }
}


impl TryFrom<V2StackEntity> for StackEntry {
    type Error = ProviderError;

    fn try_from(entity: V2StackEntity) -> Result<Self, Self::Error> {
        let r#type = entity
            .r#type
            .ok_or_else(|| ProviderError::InvalidResponse("stack entry without type".to_string()))?;
        let value = entity
            .value
            .ok_or_else(|| ProviderError::InvalidResponse("stack entry without value".to_string()))?;

        match (r#type, value) {
            (StackItemType::Num, StringOrInt::Int(i)) => Ok(StackEntry::Num(BigInt::from(i))),
            (StackItemType::Num, StringOrInt::String(s)) => Ok(StackEntry::Num(parse_num(&s)?)),
            (StackItemType::Cell, StringOrInt::String(s)) => Ok(StackEntry::Cell(base64_to_boc(&s)?)),
            (StackItemType::Slice, StringOrInt::String(s)) => Ok(StackEntry::Slice(base64_to_boc(&s)?)),
            (other, StringOrInt::Int(i)) => Err(ProviderError::InvalidResponse(format!(
                "{other:?} entry carries integer {i}"
            ))),
        }
    }
}


fn num_to_hex(n: &BigInt) -> String {
    let (sign, magnitude) = (n.sign(), n.magnitude());
    match sign {
        Sign::Minus => format!("-0x{magnitude:x}"),
        _ => format!("0x{magnitude:x}"),
    }
}

/// Accepts `0x`-prefixed hex (optionally negative) and plain decimal
fn parse_num(s: &str) -> Result<BigInt, ProviderError> {
    let s = s.trim();
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };
    let parsed = match digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")) {
        Some(hex) => BigInt::parse_bytes(hex.as_bytes(), 16),
        None => BigInt::parse_bytes(digits.as_bytes(), 10),
    };
    let n = parsed.ok_or_else(|| ProviderError::InvalidResponse(format!("bad number {s:?}")))?;
    Ok(if negative { -n } else { n })
}
