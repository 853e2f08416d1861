//! Entity ID Codes.
//!
//! Reference: IPMI 2.0 Specification, Table 43-13 "Entity ID Codes"

macro_rules! entity_id {
    {
        $($name:ident = [$value:literal, $desc:literal],)*
    } => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum EntityId {
            $($name,)*
            ChassisSpecific(u8),
            BoardSetSpecific(u8),
            Oem(u8),
            Reserved(u8),
        }

        impl EntityId {
            pub fn description(&self) -> &'static str {
                match self {
                    $(Self::$name => $desc,)*
                    Self::ChassisSpecific(_) => "Chassis-specific",
                    Self::BoardSetSpecific(_) => "Board-set specific",
                    Self::Oem(_) => "OEM system integrator defined",
                    Self::Reserved(_) => "Reserved",
                }
            }
        }

        impl From<u8> for EntityId {
            fn from(value: u8) -> Self {
                match value {
                    $($value => Self::$name,)*
                    0x90..=0xAF => Self::ChassisSpecific(value),
                    0xB0..=0xCF => Self::BoardSetSpecific(value),
                    0xD0..=0xFF => Self::Oem(value),
                    v => Self::Reserved(v),
                }
            }
        }

        impl From<EntityId> for u8 {
            fn from(value: EntityId) -> u8 {
                match value {
                    $(EntityId::$name => $value,)*
                    EntityId::ChassisSpecific(v)
                    | EntityId::BoardSetSpecific(v)
                    | EntityId::Oem(v)
                    | EntityId::Reserved(v) => v,
                }
            }
        }
    };
}

entity_id! {
    Unspecified = [0x00, "Unspecified"],
    Other = [0x01, "Other"],
    Unknown = [0x02, "Unknown"],
    Processor = [0x03, "Processor"],
    Disk = [0x04, "Disk or Disk Bay"],
    PeripheralBay = [0x05, "Peripheral Bay"],
    SystemManagementModule = [0x06, "System Management Module"],
    SystemBoard = [0x07, "System Board"],
    MemoryModule = [0x08, "Memory Module"],
    ProcessorModule = [0x09, "Processor Module"],
    PowerSupply = [0x0A, "Power Supply"],
    AddInCard = [0x0B, "Add-in Card"],
    FrontPanelBoard = [0x0C, "Front Panel Board"],
    BackPanelBoard = [0x0D, "Back Panel Board"],
    PowerSystemBoard = [0x0E, "Power System Board"],
    DriveBackplane = [0x0F, "Drive Backplane"],
    SystemInternalExpansionBoard = [0x10, "System Internal Expansion Board"],
    OtherSystemBoard = [0x11, "Other System Board"],
    ProcessorBoard = [0x12, "Processor Board"],
    PowerUnit = [0x13, "Power Unit / Power Domain"],
    PowerModule = [0x14, "Power Module / DC-to-DC Converter"],
    PowerManagement = [0x15, "Power Management / Power Distribution Board"],
    ChassisBackPanelBoard = [0x16, "Chassis Back Panel Board"],
    SystemChassis = [0x17, "System Chassis"],
    SubChassis = [0x18, "Sub-Chassis"],
    OtherChassisBoard = [0x19, "Other Chassis Board"],
    DiskDriveBay = [0x1A, "Disk Drive Bay"],
    PeripheralBay2 = [0x1B, "Peripheral Bay"],
    DeviceBay = [0x1C, "Device Bay"],
    Fan = [0x1D, "Fan / Cooling Device"],
    CoolingUnit = [0x1E, "Cooling Unit / Cooling Domain"],
    Cable = [0x1F, "Cable / Interconnect"],
    MemoryDevice = [0x20, "Memory Device"],
    SystemManagementSoftware = [0x21, "System Management Software"],
    SystemFirmware = [0x22, "System Firmware"],
    OperatingSystem = [0x23, "Operating System"],
    SystemBus = [0x24, "System Bus"],
    Group = [0x25, "Group"],
    RemoteManagementCommunicationDevice = [0x26, "Remote Management Communication Device"],
    ExternalEnvironment = [0x27, "External Environment"],
    Battery = [0x28, "Battery"],
    ProcessingBlade = [0x29, "Processing Blade"],
    ConnectivitySwitch = [0x2A, "Connectivity Switch"],
    ProcessorMemoryModule = [0x2B, "Processor / Memory Module"],
    IoModule = [0x2C, "I/O Module"],
    ProcessorIoModule = [0x2D, "Processor / IO Module"],
    ManagementControllerFirmware = [0x2E, "Management Controller Firmware"],
    IpmiChannel = [0x2F, "IPMI Channel"],
    PciBus = [0x30, "PCI Bus"],
    PciExpressBus = [0x31, "PCI Express Bus"],
    ScsiBus = [0x32, "SCSI Bus (parallel)"],
    SataSasBus = [0x33, "SATA / SAS Bus"],
    ProcessorFrontSideBus = [0x34, "Processor / Front-side Bus"],
    RealTimeClock = [0x35, "Real Time Clock"],
    AirInlet = [0x37, "Air Inlet"],
    AirInlet2 = [0x40, "Air Inlet"],
    Processor2 = [0x41, "Processor"],
    Baseboard = [0x42, "Baseboard"],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranges() {
        assert_eq!(EntityId::from(0x07), EntityId::SystemBoard);
        assert_eq!(EntityId::from(0x36), EntityId::Reserved(0x36));
        assert_eq!(EntityId::from(0x95), EntityId::ChassisSpecific(0x95));
        assert_eq!(EntityId::from(0xB0), EntityId::BoardSetSpecific(0xB0));
        assert_eq!(EntityId::from(0xFF), EntityId::Oem(0xFF));

        for value in 0..=255u8 {
            assert_eq!(u8::from(EntityId::from(value)), value);
        }
    }
}
