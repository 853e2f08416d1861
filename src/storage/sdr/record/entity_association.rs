//! Entity Association records (types `0x08` and `0x09`).
//!
//! Reference: IPMI 2.0 Specification, Tables 43-4 and 43-5.

use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityAssociationFlags {
    /// The contained entities are given as (first, last) ranges instead of a list.
    pub range: bool,
    /// More association records with the same container exist.
    pub linked: bool,
    /// The presence sensor of the container should always be accessed to
    /// determine whether the container is present.
    pub presence_sensor_always_present: bool,
}

impl From<u8> for EntityAssociationFlags {
    fn from(value: u8) -> Self {
        Self {
            range: (value & 0x80) == 0x80,
            linked: (value & 0x40) == 0x40,
            presence_sensor_always_present: (value & 0x20) == 0x20,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainedEntity {
    pub entity_id: EntityId,
    pub entity_instance: EntityInstance,
}

impl ContainedEntity {
    fn parse(entity_id: u8, entity_instance: u8) -> Option<Self> {
        // An entity ID of 0 marks an unused slot.
        (entity_id != 0).then(|| Self {
            entity_id: EntityId::from(entity_id),
            entity_instance: EntityInstance::from(entity_instance),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainedEntities {
    List(Vec<ContainedEntity>),
    /// Inclusive ranges of entity instances.
    Ranges(Vec<(ContainedEntity, ContainedEntity)>),
}

impl ContainedEntities {
    fn parse(range: bool, slots: [Option<ContainedEntity>; 4]) -> Self {
        if range {
            let ranges = slots
                .chunks(2)
                .filter_map(|pair| match pair {
                    [Some(first), Some(last)] => Some((*first, *last)),
                    _ => None,
                })
                .collect();
            Self::Ranges(ranges)
        } else {
            Self::List(slots.into_iter().flatten().collect())
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EntityAssociation {
    pub container_entity_id: EntityId,
    pub container_entity_instance: EntityInstance,
    pub flags: EntityAssociationFlags,
    pub contained: ContainedEntities,
}

impl EntityAssociation {
    pub const SIZE: usize = 11;

    pub fn parse(record_data: &[u8]) -> Result<Self, ParseError> {
        ParseError::ensure(record_data, Self::SIZE)?;

        let flags = EntityAssociationFlags::from(record_data[2]);

        let slot = |idx: usize| {
            let offset = 3 + idx * 2;
            ContainedEntity::parse(record_data[offset], record_data[offset + 1])
        };

        Ok(Self {
            container_entity_id: EntityId::from(record_data[0]),
            container_entity_instance: EntityInstance::from(record_data[1]),
            flags,
            contained: ContainedEntities::parse(flags.range, [slot(0), slot(1), slot(2), slot(3)]),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceRelativeEntity {
    pub device_address: u8,
    pub channel: Channel,
    pub entity: ContainedEntity,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeviceRelativeEntityAssociation {
    pub container_entity_id: EntityId,
    pub container_entity_instance: EntityInstance,
    pub container_device_address: u8,
    pub container_channel: Channel,
    pub flags: EntityAssociationFlags,
    pub contained: Vec<DeviceRelativeEntity>,
}

impl DeviceRelativeEntityAssociation {
    pub const SIZE: usize = 21;

    pub fn parse(record_data: &[u8]) -> Result<Self, ParseError> {
        ParseError::ensure(record_data, Self::SIZE)?;

        let contained = record_data[5..Self::SIZE]
            .chunks_exact(4)
            .filter_map(|entry| {
                ContainedEntity::parse(entry[2], entry[3]).map(|entity| DeviceRelativeEntity {
                    device_address: entry[0] >> 1,
                    channel: Channel::from_low_bits(entry[1] >> 4),
                    entity,
                })
            })
            .collect();

        Ok(Self {
            container_entity_id: EntityId::from(record_data[0]),
            container_entity_instance: EntityInstance::from(record_data[1]),
            container_device_address: record_data[2] >> 1,
            container_channel: Channel::from_low_bits(record_data[3] >> 4),
            flags: EntityAssociationFlags::from(record_data[4]),
            contained,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_and_ranges() {
        let data = [
            0x17, 0x01, 0x40, 0x0A, 0x01, 0x0A, 0x02, 0x00, 0x00, 0x0A, 0x04,
        ];
        let record = EntityAssociation::parse(&data).unwrap();

        assert_eq!(record.container_entity_id, EntityId::from(0x17));
        assert!(record.flags.linked);
        match &record.contained {
            ContainedEntities::List(list) => {
                assert_eq!(list.len(), 3);
                assert_eq!(list[2].entity_id, EntityId::PowerSupply);
                assert_eq!(list[2].entity_instance.instance_number(), 4);
            }
            other => panic!("Expected list, got {other:?}"),
        }

        let mut data = data;
        data[2] = 0x80;
        let record = EntityAssociation::parse(&data).unwrap();
        match &record.contained {
            ContainedEntities::Ranges(ranges) => {
                assert_eq!(ranges.len(), 1);
                assert_eq!(ranges[0].0.entity_instance.instance_number(), 1);
                assert_eq!(ranges[0].1.entity_instance.instance_number(), 2);
            }
            other => panic!("Expected ranges, got {other:?}"),
        }

        assert!(EntityAssociation::parse(&data[..10]).is_err());
    }

    #[test]
    fn association_flags() {
        let flags = EntityAssociationFlags::from(0x20);
        assert!(flags.presence_sensor_always_present);
        assert!(!flags.range);
        assert!(!flags.linked);

        let flags = EntityAssociationFlags::from(0xDF);
        assert!(flags.range && flags.linked);
        assert!(!flags.presence_sensor_always_present);
    }

    #[test]
    fn device_relative() {
        let mut data = vec![0x17, 0x01, 0x20, 0x00, 0x00];
        data.extend_from_slice(&[0x20, 0x00, 0x0A, 0x01]);
        data.extend_from_slice(&[0x22, 0x10, 0x0A, 0x02]);
        data.extend_from_slice(&[0x00; 8]);

        let record = DeviceRelativeEntityAssociation::parse(&data).unwrap();
        assert_eq!(record.container_device_address, 0x10);
        assert_eq!(record.contained.len(), 2);
        assert_eq!(record.contained[1].device_address, 0x11);
        assert_eq!(record.contained[1].channel.value(), 1);

        assert!(matches!(
            DeviceRelativeEntityAssociation::parse(&data[..20]),
            Err(ParseError::InsufficientData {
                needed: 21,
                available: 20,
            })
        ));
    }
}
