use crate::storage::sdr::{
    event_description, EntityId, EventDescription, EventReadingTypeCodes, Mask, MaskView,
    SensorType,
};

use super::{
    Direction, EntityInstance, SensorCapabilities, SensorId, SensorKey, SensorNumber,
    SensorOwner, SensorRecordCommon, SensorUnits,
};

/// Sensors that record whether they monitor an input or an output.
pub trait DirectionalSensor {
    fn direction(&self) -> Direction;
}

/// Records that name an entity and carry an ID string.
pub trait IdentifiableSensor {
    fn id_string(&self) -> &SensorId;

    fn entity_id(&self) -> EntityId;
}

/// Sensors bound to one instance of an entity.
pub trait InstancedSensor: IdentifiableSensor {
    fn ty(&self) -> &SensorType;

    fn event_reading_type_codes(&self) -> &EventReadingTypeCodes;

    fn entity_instance(&self) -> &EntityInstance;

    fn key_data(&self) -> &SensorKey;

    /// Describe event offset `offset` of this sensor.
    fn describe_offset(&self, offset: u8) -> Option<EventDescription> {
        event_description(*self.event_reading_type_codes(), *self.ty(), offset)
    }
}

/// Full and compact sensor records, which share the layout of their first
/// 18 body bytes.
pub trait WithSensorRecordCommon {
    fn common(&self) -> &SensorRecordCommon;

    fn capabilities(&self) -> &SensorCapabilities {
        &self.common().capabilities
    }

    fn sensor_number(&self) -> SensorNumber {
        self.common().key.sensor_number
    }

    fn owner(&self) -> SensorOwner {
        self.common().key.owner_id
    }

    fn units(&self) -> &SensorUnits {
        &self.common().sensor_units
    }

    fn mask(&self) -> &Mask {
        &self.common().mask
    }

    /// The event/reading mask, interpreted according to the
    /// event/reading type of this sensor.
    fn mask_view(&self) -> MaskView {
        let common = self.common();
        common.mask.view(&common.event_reading_type_code)
    }
}

impl<T> IdentifiableSensor for T
where
    T: WithSensorRecordCommon,
{
    fn id_string(&self) -> &SensorId {
        &self.common().sensor_id
    }

    fn entity_id(&self) -> EntityId {
        self.common().entity_id
    }
}

impl<T> InstancedSensor for T
where
    T: WithSensorRecordCommon,
{
    fn ty(&self) -> &SensorType {
        &self.common().ty
    }

    fn event_reading_type_codes(&self) -> &EventReadingTypeCodes {
        &self.common().event_reading_type_code
    }

    fn entity_instance(&self) -> &EntityInstance {
        &self.common().entity_instance
    }

    fn key_data(&self) -> &SensorKey {
        &self.common().key
    }
}
