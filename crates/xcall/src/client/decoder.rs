use super::RawEventLog;
use crate::error::{XCallError, XCallResult};
use crate::types::{XCallEvent, XCallEventData};
use num_bigint::BigInt;
use num_traits::{One, ToPrimitive};
use tracing::warn;

/// Turns raw logs into xCall events.
///
/// Both supported chain families emit the xCall events with the same argument
/// positions; they differ in how signatures are named and integers encoded.
///
/// | event           | indexed            | data            |
/// |-----------------|--------------------|-----------------|
/// | CallMessageSent | from, to, sn       |                 |
/// | CallMessage     | from, to, sn       | req_id, payload |
/// | CallExecuted    | req_id             | code, message   |
/// | RollbackMessage | sn                 |                 |
pub trait EventLogDecoder: Send + Sync {
    /// Parses an unsigned integer argument.
    fn parse_uint(&self, value: &str) -> XCallResult<BigInt>;

    /// Parses a signed integer argument.
    fn parse_int(&self, value: &str) -> XCallResult<BigInt> {
        self.parse_uint(value)
    }

    /// Decodes `log`, returning `None` for non-xCall or malformed logs.
    fn decode(&self, log: &RawEventLog) -> Option<XCallEvent> {
        match decode_xcall_log(self, log) {
            Ok(event) => event,
            Err(e) => {
                warn!(tx = %log.tx_hash, signature = %log.signature, error = %e, "Skipping malformed xCall log");
                None
            }
        }
    }
}

fn decode_xcall_log<D: EventLogDecoder + ?Sized>(
    decoder: &D,
    log: &RawEventLog,
) -> XCallResult<Option<XCallEvent>> {
    let name = log.signature.split('(').next().unwrap_or_default().trim();
    let data = match name {
        "CallMessageSent" => XCallEventData::CallMessageSent {
            sn: decoder.parse_uint(arg(&log.indexed, 2, log)?)?,
        },
        "CallMessage" => XCallEventData::CallMessage {
            sn: decoder.parse_uint(arg(&log.indexed, 2, log)?)?,
            req_id: decoder.parse_uint(arg(&log.data, 0, log)?)?,
        },
        "CallExecuted" => {
            let code = decoder.parse_int(arg(&log.data, 0, log)?)?;
            XCallEventData::CallExecuted {
                req_id: decoder.parse_uint(arg(&log.indexed, 0, log)?)?,
                code: code
                    .to_i64()
                    .ok_or_else(|| XCallError::Decode(format!("result code {code}")))?,
            }
        }
        "RollbackMessage" => XCallEventData::RollbackMessage {
            sn: decoder.parse_uint(arg(&log.indexed, 0, log)?)?,
        },
        _ => return Ok(None),
    };
    Ok(Some(XCallEvent::new(log.tx_hash.clone(), log.block_height, data)))
}

fn arg<'a>(values: &'a [String], index: usize, log: &RawEventLog) -> XCallResult<&'a str> {
    values
        .get(index)
        .map(String::as_str)
        .ok_or_else(|| XCallError::Decode(format!("{} is missing argument {index}", log.signature)))
}

fn parse_hex(value: &str) -> XCallResult<BigInt> {
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value);
    BigInt::parse_bytes(digits.as_bytes(), 16).ok_or_else(|| XCallError::Decode(format!("hex integer {value:?}")))
}

/// ICON: full Java-style signatures, integers as `0x`-prefixed hex with an
/// optional leading minus sign.
#[derive(Debug, Clone, Copy, Default)]
pub struct IconEventDecoder;

impl EventLogDecoder for IconEventDecoder {
    fn parse_uint(&self, value: &str) -> XCallResult<BigInt> {
        match value.strip_prefix('-') {
            Some(magnitude) => Ok(-parse_hex(magnitude)?),
            None => parse_hex(value),
        }
    }
}

/// EVM: 32-byte words, signed integers in two's complement.
#[derive(Debug, Clone, Copy, Default)]
pub struct EvmEventDecoder;

impl EventLogDecoder for EvmEventDecoder {
    fn parse_uint(&self, value: &str) -> XCallResult<BigInt> {
        parse_hex(value)
    }

    fn parse_int(&self, value: &str) -> XCallResult<BigInt> {
        let word = parse_hex(value)?;
        let sign_bit = BigInt::one() << 255u32;
        if word >= sign_bit {
            Ok(word - (BigInt::one() << 256u32))
        } else {
            Ok(word)
        }
    }
}
