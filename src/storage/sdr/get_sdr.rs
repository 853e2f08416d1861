use crate::ParseError;

use super::{record::Record, RecordId};

/// The decoded response data of a Get SDR command.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordInfo {
    pub next_entry: RecordId,
    pub record: Record,
}

impl RecordInfo {
    pub fn parse(data: &[u8]) -> Result<Self, ParseError> {
        let next_entry = RecordId::new_raw(crate::bits::u16_le(data, 0)?);
        let record = Record::parse(&data[2..])?;

        Ok(Self { next_entry, record })
    }
}

/// Walks an SDR repository by following the next-record-ID chain.
///
/// `fetch` is called with the ID of every record to read, starting at
/// [`RecordId::FIRST`], and returns the raw Get SDR response data. The walk
/// ends after the record whose next ID is [`RecordId::LAST`], or when a
/// record ID repeats.
///
/// Errors are yielded to the caller, which may keep iterating to skip the
/// offending record. A record whose body fails to parse still carries the
/// next record ID, so the walk continues past it. A failed fetch, or a
/// response too short to hold a next ID, ends the walk.
pub struct SdrWalker<F, E> {
    fetch: F,
    next_id: Option<RecordId>,
    seen: Vec<RecordId>,
    _error: core::marker::PhantomData<E>,
}

impl<F, E> SdrWalker<F, E>
where
    F: FnMut(RecordId) -> Result<Vec<u8>, E>,
    E: From<ParseError>,
{
    pub fn new(fetch: F) -> Self {
        Self {
            fetch,
            next_id: Some(RecordId::FIRST),
            seen: Vec::new(),
            _error: core::marker::PhantomData,
        }
    }
}

impl<F, E> Iterator for SdrWalker<F, E>
where
    F: FnMut(RecordId) -> Result<Vec<u8>, E>,
    E: From<ParseError>,
{
    type Item = Result<Record, E>;

    fn next(&mut self) -> Option<Self::Item> {
        let current_id = self.next_id.take()?;

        if self.seen.contains(&current_id) {
            warn!(
                "SDR record 0x{:04X} was already read, stopping walk",
                current_id.value()
            );
            return None;
        }
        self.seen.push(current_id);

        let data = match (self.fetch)(current_id) {
            Ok(data) => data,
            Err(e) => return Some(Err(e)),
        };

        let next_entry = match crate::bits::u16_le(&data, 0) {
            Ok(value) => RecordId::new_raw(value),
            Err(e) => return Some(Err(e.into())),
        };

        if !next_entry.is_last() {
            self.next_id = Some(next_entry);
        }

        Some(Record::parse(&data[2..]).map_err(E::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unknown_record(id: u16, next: u16) -> Vec<u8> {
        let mut data = next.to_le_bytes().to_vec();
        data.extend_from_slice(&id.to_le_bytes());
        data.extend_from_slice(&[0x51, 0x42, 0x01, 0x00]);
        data
    }

    #[test]
    fn walks_chain() {
        let walker = SdrWalker::new(|id: RecordId| -> Result<_, ParseError> {
            Ok(match id.value() {
                0 => unknown_record(0, 7),
                7 => unknown_record(7, 0xFFFF),
                _ => panic!("Unexpected record ID"),
            })
        });

        let ids: Vec<_> = walker.map(|r| r.unwrap().header.id.value()).collect();
        assert_eq!(ids, vec![0, 7]);
    }

    #[test]
    fn stops_on_repeated_id() {
        let walker = SdrWalker::new(|id: RecordId| -> Result<_, ParseError> {
            Ok(unknown_record(id.value(), 3))
        });

        let ids: Vec<_> = walker.map(|r| r.unwrap().header.id.value()).collect();
        assert_eq!(ids, vec![0, 3]);
    }

    #[test]
    fn surfaces_errors() {
        let mut walker =
            SdrWalker::new(|_: RecordId| -> Result<_, ParseError> { Ok(vec![0x00]) });

        assert!(matches!(
            walker.next(),
            Some(Err(ParseError::InsufficientData {
                needed: 2,
                available: 1,
            }))
        ));
        assert!(walker.next().is_none());
    }

    #[test]
    fn skips_malformed_record() {
        let walker = SdrWalker::new(|id: RecordId| -> Result<_, ParseError> {
            Ok(match id.value() {
                0 => unknown_record(0, 2),
                // Full sensor record with a 3 byte body.
                2 => vec![0x05, 0x00, 0x02, 0x00, 0x51, 0x01, 0x03, 0x20, 0x00, 0x30],
                5 => unknown_record(5, 0xFFFF),
                _ => panic!("Unexpected record ID"),
            })
        });

        let results: Vec<_> = walker.collect();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().header.id.value(), 0);
        assert!(matches!(
            results[1],
            Err(ParseError::InsufficientData { .. })
        ));
        assert_eq!(results[2].as_ref().unwrap().header.id.value(), 5);
    }
}
