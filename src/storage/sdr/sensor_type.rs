//! Sensor Type Codes.
//!
//! Reference: IPMI 2.0 Specification, Table 42-3 "Sensor Type Codes"

macro_rules ! sensor_type {
    {
        pub enum SensorType {
            $($name:ident = [$value:literal, $desc:literal],)*
            [$reserved_range:pat],
            [$oem_reserved_range:pat],
        }
    } => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum SensorType {
            $($name,)*
            Reserved(u8),
            OemReserved(u8),
        }

        impl SensorType {
            pub fn description(&self) -> &'static str {
                match self {
                    $(Self::$name => $desc,)*
                    Self::Reserved(_) => "Reserved",
                    Self::OemReserved(_) => "OEM reserved",
                }
            }
        }

        impl From<u8> for SensorType {
            fn from(value: u8) -> Self {
                match value {
                    $($value => Self::$name,)*
                    0 | $reserved_range => Self::Reserved(value),
                    $oem_reserved_range => Self::OemReserved(value),
                }
            }
        }

        impl From<SensorType> for u8 {
            fn from(value: SensorType) -> u8 {
                match value {
                    $(SensorType::$name => $value,)*
                    SensorType::Reserved(v) => v,
                    SensorType::OemReserved(v) => v,
                }
            }
        }

        impl TryFrom<&str> for SensorType {
            type Error = ();

            fn try_from(input: &str) -> Result<Self, Self::Error> {
                $(
                    if stringify!($name).eq_ignore_ascii_case(input)
                        || $desc.eq_ignore_ascii_case(input)
                    {
                        return Ok(SensorType::$name);
                    }
                )*

                Err(())
            }
        }
    }
}

sensor_type! {
    pub enum SensorType {
        Temperature = [0x01, "Temperature"],
        Voltage = [0x02, "Voltage"],
        Current = [0x03, "Current"],
        Fan = [0x04, "Fan"],
        ChassisIntrusion = [0x05, "Physical Security"],
        PlatformSecurityViolationAttempt = [0x06, "Platform Security"],
        Processor = [0x07, "Processor"],
        PowerSupply = [0x08, "Power Supply"],
        PowerUnit = [0x09, "Power Unit"],
        CoolingDevice = [0x0A, "Cooling Device"],
        UnitsBasedSensor = [0x0B, "Other"],
        Memory = [0x0C, "Memory"],
        DriveSlotBay = [0x0D, "Drive Slot / Bay"],
        PostMemoryResize = [0x0E, "POST Memory Resize"],
        SystemFirmwareProgress = [0x0F, "System Firmware Progress"],
        EventLoggingDisabled = [0x10, "Event Logging Disabled"],
        Watchdog1 = [0x11, "Watchdog 1"],
        SystemEvent = [0x12, "System Event"],
        CriticalInterrupt = [0x13, "Critical Interrupt"],
        ButtonOrSwitch = [0x14, "Button / Switch"],
        ModuleOrBoard = [0x15, "Module / Board"],
        MicroControllerOrCoprocessor = [0x16, "Microcontroller / Coprocessor"],
        AddinCard = [0x17, "Add-in Card"],
        Chassis = [0x18, "Chassis"],
        ChipSet = [0x19, "Chip Set"],
        OtherFRU = [0x1A, "Other FRU"],
        CableOrInterconnect = [0x1B, "Cable / Interconnect"],
        Terminator = [0x1C, "Terminator"],
        SystemBootOrRestartInitiated = [0x1D, "System Boot Initiated"],
        BootError = [0x1E, "Boot Error"],
        BaseOsBootOrInstallationStatus = [0x1F, "OS Boot"],
        OsStopOrShutdown = [0x20, "OS Critical Stop"],
        SlotOrConnector = [0x21, "Slot / Connector"],
        SystemACPIPowerState = [0x22, "System ACPI Power State"],
        Watchdog2 = [0x23, "Watchdog 2"],
        PlatformAlert = [0x24, "Platform Alert"],
        EntityPresence = [0x25, "Entity Presence"],
        MonitorAsicOrIc = [0x26, "Monitor ASIC"],
        LAN = [0x27, "LAN"],
        ManagementSubSysHealth = [0x28, "Management Subsystem Health"],
        Battery = [0x29, "Battery"],
        SessionAudit = [0x2A, "Session Audit"],
        VersionChange = [0x2B, "Version Change"],
        FRUState = [0x2C, "FRU State"],
        [0x2D..=0xBF],
        [0xC0..=0xFF],
    }
}
