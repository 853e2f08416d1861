//! Event offset descriptions and severities.
//!
//! Reference: IPMI 2.0 Specification, Table 42-2 "Generic Event/Reading Type
//! Codes" and Table 42-3 "Sensor Type Codes and Data"
//!
//! Offsets are the low 4 bits of event data 1. All tables are constant and
//! looked up by linear scan.

use super::{EventReadingTypeCodes, SensorType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventSeverity {
    Ok,
    Info,
    Warning,
    Critical,
    NonRecoverable,
}

impl core::fmt::Display for EventSeverity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Self::Ok => "OK",
            Self::Info => "Info",
            Self::Warning => "Warning",
            Self::Critical => "Critical",
            Self::NonRecoverable => "Non-recoverable",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventDescription {
    pub description: &'static str,
    pub severity: EventSeverity,
}

type OffsetTable = &'static [(u8, &'static str, EventSeverity)];

use EventSeverity::*;

const THRESHOLD: OffsetTable = &[
    (0x00, "Lower Non-critical - going low", Warning),
    (0x01, "Lower Non-critical - going high", Warning),
    (0x02, "Lower Critical - going low", Critical),
    (0x03, "Lower Critical - going high", Critical),
    (0x04, "Lower Non-recoverable - going low", NonRecoverable),
    (0x05, "Lower Non-recoverable - going high", NonRecoverable),
    (0x06, "Upper Non-critical - going low", Warning),
    (0x07, "Upper Non-critical - going high", Warning),
    (0x08, "Upper Critical - going low", Critical),
    (0x09, "Upper Critical - going high", Critical),
    (0x0A, "Upper Non-recoverable - going low", NonRecoverable),
    (0x0B, "Upper Non-recoverable - going high", NonRecoverable),
];

const USAGE_STATE: OffsetTable = &[
    (0x00, "Transition to Idle", Info),
    (0x01, "Transition to Active", Info),
    (0x02, "Transition to Busy", Info),
];

const STATE: OffsetTable = &[
    (0x00, "State Deasserted", Info),
    (0x01, "State Asserted", Info),
];

const PREDICTIVE_FAILURE: OffsetTable = &[
    (0x00, "Predictive Failure deasserted", Ok),
    (0x01, "Predictive Failure asserted", Warning),
];

const LIMIT: OffsetTable = &[
    (0x00, "Limit Not Exceeded", Ok),
    (0x01, "Limit Exceeded", Warning),
];

const PERFORMANCE: OffsetTable = &[
    (0x00, "Performance Met", Ok),
    (0x01, "Performance Lags", Warning),
];

const SEVERITY: OffsetTable = &[
    (0x00, "transition to OK", Ok),
    (0x01, "transition to Non-Critical from OK", Warning),
    (0x02, "transition to Critical from less severe", Critical),
    (
        0x03,
        "transition to Non-recoverable from less severe",
        NonRecoverable,
    ),
    (0x04, "transition to Non-Critical from more severe", Warning),
    (
        0x05,
        "transition to Critical from Non-recoverable",
        Critical,
    ),
    (0x06, "transition to Non-recoverable", NonRecoverable),
    (0x07, "Monitor", Info),
    (0x08, "Informational", Info),
];

const DEVICE_PRESENCE: OffsetTable = &[
    (0x00, "Device Removed / Device Absent", Info),
    (0x01, "Device Inserted / Device Present", Info),
];

const DEVICE_ENABLED: OffsetTable = &[
    (0x00, "Device Disabled", Info),
    (0x01, "Device Enabled", Info),
];

const AVAILABILITY: OffsetTable = &[
    (0x00, "transition to Running", Ok),
    (0x01, "transition to In Test", Info),
    (0x02, "transition to Power Off", Info),
    (0x03, "transition to On Line", Ok),
    (0x04, "transition to Off Line", Warning),
    (0x05, "transition to Off Duty", Info),
    (0x06, "transition to Degraded", Warning),
    (0x07, "transition to Power Save", Info),
    (0x08, "Install Error", Critical),
];

const REDUNDANCY: OffsetTable = &[
    (0x00, "Fully Redundant", Ok),
    (0x01, "Redundancy Lost", Critical),
    (0x02, "Redundancy Degraded", Warning),
    (
        0x03,
        "Non-redundant: Sufficient Resources from Redundant",
        Critical,
    ),
    (
        0x04,
        "Non-redundant: Sufficient Resources from Insufficient Resources",
        Warning,
    ),
    (0x05, "Non-redundant: Insufficient Resources", Critical),
    (0x06, "Redundancy Degraded from Fully Redundant", Warning),
    (0x07, "Redundancy Degraded from Non-redundant", Warning),
];

const ACPI_DEVICE_POWER: OffsetTable = &[
    (0x00, "D0 Power State", Info),
    (0x01, "D1 Power State", Info),
    (0x02, "D2 Power State", Info),
    (0x03, "D3 Power State", Info),
];

const PHYSICAL_SECURITY: OffsetTable = &[
    (0x00, "General Chassis Intrusion", Critical),
    (0x01, "Drive Bay intrusion", Critical),
    (0x02, "I/O Card area intrusion", Critical),
    (0x03, "Processor area intrusion", Critical),
    (0x04, "LAN Leash Lost", Warning),
    (0x05, "Unauthorized dock/undock", Warning),
    (0x06, "FAN area intrusion", Critical),
];

const PLATFORM_SECURITY: OffsetTable = &[
    (0x00, "Secure Mode Violation Attempt", Warning),
    (0x01, "Pre-boot Password Violation - user password", Warning),
    (
        0x02,
        "Pre-boot Password Violation - setup password",
        Warning,
    ),
    (
        0x03,
        "Pre-boot Password Violation - network boot password",
        Warning,
    ),
    (0x04, "Other pre-boot Password Violation", Warning),
    (0x05, "Out-of-band Access Password Violation", Warning),
];

const PROCESSOR: OffsetTable = &[
    (0x00, "IERR", Critical),
    (0x01, "Thermal Trip", NonRecoverable),
    (0x02, "FRB1/BIST failure", Critical),
    (0x03, "FRB2/Hang in POST failure", Critical),
    (
        0x04,
        "FRB3/Processor Startup/Initialization failure",
        Critical,
    ),
    (0x05, "Configuration Error", Critical),
    (0x06, "SM BIOS 'Uncorrectable CPU-complex Error'", Critical),
    (0x07, "Processor Presence detected", Info),
    (0x08, "Processor disabled", Warning),
    (0x09, "Terminator Presence Detected", Info),
    (0x0A, "Processor Automatically Throttled", Warning),
    (
        0x0B,
        "Machine Check Exception (Uncorrectable)",
        NonRecoverable,
    ),
    (0x0C, "Correctable Machine Check Error", Warning),
];

const POWER_SUPPLY: OffsetTable = &[
    (0x00, "Presence detected", Info),
    (0x01, "Power Supply Failure detected", Critical),
    (0x02, "Predictive Failure", Warning),
    (0x03, "Power Supply input lost (AC/DC)", Critical),
    (0x04, "Power Supply input lost or out-of-range", Critical),
    (
        0x05,
        "Power Supply input out-of-range, but present",
        Warning,
    ),
    (0x06, "Configuration error", Critical),
    (0x07, "Power Supply Inactive", Warning),
];

const POWER_UNIT: OffsetTable = &[
    (0x00, "Power Off / Power Down", Info),
    (0x01, "Power Cycle", Info),
    (0x02, "240VA Power Down", Critical),
    (0x03, "Interlock Power Down", Critical),
    (0x04, "AC lost / Power input lost", Critical),
    (0x05, "Soft Power Control Failure", Critical),
    (0x06, "Power Unit Failure detected", Critical),
    (0x07, "Predictive Failure", Warning),
];

const MEMORY: OffsetTable = &[
    (
        0x00,
        "Correctable ECC / other correctable memory error",
        Warning,
    ),
    (
        0x01,
        "Uncorrectable ECC / other uncorrectable memory error",
        Critical,
    ),
    (0x02, "Parity", Critical),
    (0x03, "Memory Scrub Failed", Critical),
    (0x04, "Memory Device Disabled", Warning),
    (
        0x05,
        "Correctable ECC / other correctable memory error logging limit reached",
        Warning,
    ),
    (0x06, "Presence detected", Info),
    (0x07, "Configuration error", Critical),
    (0x08, "Spare", Info),
    (0x09, "Memory Automatically Throttled", Warning),
    (0x0A, "Critical Overtemperature", Critical),
];

const DRIVE_SLOT: OffsetTable = &[
    (0x00, "Drive Presence", Info),
    (0x01, "Drive Fault", Critical),
    (0x02, "Predictive Failure", Warning),
    (0x03, "Hot Spare", Info),
    (0x04, "Consistency Check / Parity Check in progress", Info),
    (0x05, "In Critical Array", Critical),
    (0x06, "In Failed Array", NonRecoverable),
    (0x07, "Rebuild/Remap in progress", Warning),
    (0x08, "Rebuild/Remap Aborted", Critical),
];

const FIRMWARE_PROGRESS: OffsetTable = &[
    (0x00, "System Firmware Error", Critical),
    (0x01, "System Firmware Hang", Critical),
    (0x02, "System Firmware Progress", Info),
];

const EVENT_LOGGING_DISABLED: OffsetTable = &[
    (0x00, "Correctable Memory Error Logging Disabled", Warning),
    (0x01, "Event 'Type' Logging Disabled", Warning),
    (0x02, "Log Area Reset/Cleared", Info),
    (0x03, "All Event Logging Disabled", Warning),
    (0x04, "SEL Full", Warning),
    (0x05, "SEL Almost Full", Warning),
    (
        0x06,
        "Correctable Machine Check Error Logging Disabled",
        Warning,
    ),
];

const WATCHDOG_1: OffsetTable = &[
    (0x00, "BIOS Watchdog Reset", Warning),
    (0x01, "OS Watchdog Reset", Warning),
    (0x02, "OS Watchdog Shut Down", Warning),
    (0x03, "OS Watchdog Power Down", Warning),
    (0x04, "OS Watchdog Power Cycle", Warning),
    (0x05, "OS Watchdog NMI / Diagnostic Interrupt", Warning),
    (0x06, "OS Watchdog Expired, status only", Warning),
    (0x07, "OS Watchdog pre-timeout Interrupt, non-NMI", Warning),
];

const SYSTEM_EVENT: OffsetTable = &[
    (0x00, "System Reconfigured", Info),
    (0x01, "OEM System Boot Event", Info),
    (0x02, "Undetermined system hardware failure", Critical),
    (0x03, "Entry added to Auxiliary Log", Info),
    (0x04, "PEF Action", Info),
    (0x05, "Timestamp Clock Sync", Info),
];

const CRITICAL_INTERRUPT: OffsetTable = &[
    (0x00, "Front Panel NMI / Diagnostic Interrupt", Critical),
    (0x01, "Bus Timeout", Critical),
    (0x02, "I/O channel check NMI", Critical),
    (0x03, "Software NMI", Warning),
    (0x04, "PCI PERR", Critical),
    (0x05, "PCI SERR", Critical),
    (0x06, "EISA Fail Safe Timeout", Critical),
    (0x07, "Bus Correctable Error", Warning),
    (0x08, "Bus Uncorrectable Error", Critical),
    (0x09, "Fatal NMI", NonRecoverable),
    (0x0A, "Bus Fatal Error", NonRecoverable),
    (0x0B, "Bus Degraded", Warning),
];

const BUTTON: OffsetTable = &[
    (0x00, "Power Button pressed", Info),
    (0x01, "Sleep Button pressed", Info),
    (0x02, "Reset Button pressed", Info),
    (0x03, "FRU latch open", Info),
    (0x04, "FRU service request button", Info),
];

const CHIP_SET: OffsetTable = &[
    (0x00, "Soft Power Control Failure", Critical),
    (0x01, "Thermal Trip", NonRecoverable),
];

const SYSTEM_BOOT: OffsetTable = &[
    (0x00, "Initiated by power up", Info),
    (0x01, "Initiated by hard reset", Info),
    (0x02, "Initiated by warm reset", Info),
    (0x03, "User requested PXE boot", Info),
    (0x04, "Automatic boot to diagnostic", Info),
    (0x05, "OS / run-time software initiated hard reset", Info),
    (0x06, "OS / run-time software initiated warm reset", Info),
    (0x07, "System Restart", Info),
];

const BOOT_ERROR: OffsetTable = &[
    (0x00, "No bootable media", Critical),
    (0x01, "Non-bootable diskette left in drive", Warning),
    (0x02, "PXE Server not found", Warning),
    (0x03, "Invalid boot sector", Critical),
    (
        0x04,
        "Timeout waiting for user selection of boot source",
        Warning,
    ),
];

const OS_BOOT: OffsetTable = &[
    (0x00, "A: boot completed", Info),
    (0x01, "C: boot completed", Info),
    (0x02, "PXE boot completed", Info),
    (0x03, "Diagnostic boot completed", Info),
    (0x04, "CD-ROM boot completed", Info),
    (0x05, "ROM boot completed", Info),
    (0x06, "boot completed - boot device not specified", Info),
    (0x07, "Base OS/Hypervisor Installation started", Info),
    (0x08, "Base OS/Hypervisor Installation completed", Info),
    (0x09, "Base OS/Hypervisor Installation aborted", Warning),
    (0x0A, "Base OS/Hypervisor Installation failed", Critical),
];

const OS_STOP: OffsetTable = &[
    (
        0x00,
        "Critical stop during OS load / initialization",
        Critical,
    ),
    (0x01, "Run-time Critical Stop", Critical),
    (0x02, "OS Graceful Stop", Info),
    (0x03, "OS Graceful Shutdown", Info),
    (0x04, "Soft Shutdown initiated by PEF", Info),
    (0x05, "Agent Not Responding", Warning),
];

const ACPI_POWER_STATE: OffsetTable = &[
    (0x00, "S0 / G0 'working'", Info),
    (
        0x01,
        "S1 'sleeping with system h/w & processor context maintained'",
        Info,
    ),
    (0x02, "S2 'sleeping, processor context lost'", Info),
    (
        0x03,
        "S3 'sleeping, processor & h/w context lost, memory retained'",
        Info,
    ),
    (0x04, "S4 'non-volatile sleep / suspend-to-disk'", Info),
    (0x05, "S5 / G2 'soft-off'", Info),
    (
        0x06,
        "S4 / S5 soft-off, particular S4 / S5 state cannot be determined",
        Info,
    ),
    (0x07, "G3 / Mechanical Off", Info),
    (0x08, "Sleeping in an S1, S2, or S3 states", Info),
    (0x09, "G1 sleeping", Info),
    (0x0A, "S5 entered by override", Info),
    (0x0B, "Legacy ON state", Info),
    (0x0C, "Legacy OFF state", Info),
    (0x0E, "Unknown", Info),
];

const WATCHDOG_2: OffsetTable = &[
    (0x00, "Timer expired, status only", Warning),
    (0x01, "Hard Reset", Warning),
    (0x02, "Power Down", Warning),
    (0x03, "Power Cycle", Warning),
    (0x08, "Timer interrupt", Warning),
];

const PLATFORM_ALERT: OffsetTable = &[
    (0x00, "platform generated page", Info),
    (0x01, "platform generated LAN alert", Info),
    (0x02, "Platform Event Trap generated", Info),
    (0x03, "platform generated SNMP trap", Info),
];

const ENTITY_PRESENCE: OffsetTable = &[
    (0x00, "Entity Present", Info),
    (0x01, "Entity Absent", Warning),
    (0x02, "Entity Disabled", Warning),
];

const LAN: OffsetTable = &[
    (0x00, "LAN Heartbeat Lost", Warning),
    (0x01, "LAN Heartbeat", Info),
];

const MANAGEMENT_HEALTH: OffsetTable = &[
    (0x00, "sensor access degraded or unavailable", Warning),
    (0x01, "controller access degraded or unavailable", Warning),
    (0x02, "management controller off-line", Critical),
    (0x03, "management controller unavailable", Critical),
    (0x04, "Sensor failure", Critical),
    (0x05, "FRU failure", Critical),
];

const BATTERY: OffsetTable = &[
    (0x00, "battery low", Warning),
    (0x01, "battery failed", Critical),
    (0x02, "battery presence detected", Info),
];

const SESSION_AUDIT: OffsetTable = &[
    (0x00, "Session Activated", Info),
    (0x01, "Session Deactivated", Info),
    (0x02, "Invalid Username or Password", Warning),
    (0x03, "Invalid password disable", Warning),
];

const VERSION_CHANGE: OffsetTable = &[
    (
        0x00,
        "Hardware change detected with associated Entity",
        Info,
    ),
    (
        0x01,
        "Firmware or software change detected with associated Entity",
        Info,
    ),
    (
        0x02,
        "Hardware incompatibility detected with associated Entity",
        Warning,
    ),
    (
        0x03,
        "Firmware or software incompatibility detected with associated Entity",
        Warning,
    ),
    (
        0x04,
        "Entity is of an invalid or unsupported hardware version",
        Critical,
    ),
    (
        0x05,
        "Entity contains an invalid or unsupported firmware or software version",
        Critical,
    ),
    (
        0x06,
        "Hardware Change detected with associated Entity was successful",
        Info,
    ),
    (
        0x07,
        "Software or F/W Change detected with associated Entity was successful",
        Info,
    ),
];

const FRU_STATE: OffsetTable = &[
    (0x00, "FRU Not Installed", Info),
    (0x01, "FRU Inactive", Info),
    (0x02, "FRU Activation Requested", Info),
    (0x03, "FRU Activation In Progress", Info),
    (0x04, "FRU Active", Info),
    (0x05, "FRU Deactivation Requested", Info),
    (0x06, "FRU Deactivation In Progress", Info),
    (0x07, "FRU Communication Lost", Critical),
];

fn generic_table(code: u8) -> Option<OffsetTable> {
    let table = match code {
        0x01 => THRESHOLD,
        0x02 => USAGE_STATE,
        0x03 => STATE,
        0x04 => PREDICTIVE_FAILURE,
        0x05 => LIMIT,
        0x06 => PERFORMANCE,
        0x07 => SEVERITY,
        0x08 => DEVICE_PRESENCE,
        0x09 => DEVICE_ENABLED,
        0x0A => AVAILABILITY,
        0x0B => REDUNDANCY,
        0x0C => ACPI_DEVICE_POWER,
        _ => return None,
    };
    Some(table)
}

fn sensor_specific_table(sensor_type: SensorType) -> Option<OffsetTable> {
    let table = match sensor_type {
        SensorType::ChassisIntrusion => PHYSICAL_SECURITY,
        SensorType::PlatformSecurityViolationAttempt => PLATFORM_SECURITY,
        SensorType::Processor => PROCESSOR,
        SensorType::PowerSupply => POWER_SUPPLY,
        SensorType::PowerUnit => POWER_UNIT,
        SensorType::Memory => MEMORY,
        SensorType::DriveSlotBay => DRIVE_SLOT,
        SensorType::SystemFirmwareProgress => FIRMWARE_PROGRESS,
        SensorType::EventLoggingDisabled => EVENT_LOGGING_DISABLED,
        SensorType::Watchdog1 => WATCHDOG_1,
        SensorType::SystemEvent => SYSTEM_EVENT,
        SensorType::CriticalInterrupt => CRITICAL_INTERRUPT,
        SensorType::ButtonOrSwitch => BUTTON,
        SensorType::ChipSet => CHIP_SET,
        SensorType::SystemBootOrRestartInitiated => SYSTEM_BOOT,
        SensorType::BootError => BOOT_ERROR,
        SensorType::BaseOsBootOrInstallationStatus => OS_BOOT,
        SensorType::OsStopOrShutdown => OS_STOP,
        SensorType::SystemACPIPowerState => ACPI_POWER_STATE,
        SensorType::Watchdog2 => WATCHDOG_2,
        SensorType::PlatformAlert => PLATFORM_ALERT,
        SensorType::EntityPresence => ENTITY_PRESENCE,
        SensorType::LAN => LAN,
        SensorType::ManagementSubSysHealth => MANAGEMENT_HEALTH,
        SensorType::Battery => BATTERY,
        SensorType::SessionAudit => SESSION_AUDIT,
        SensorType::VersionChange => VERSION_CHANGE,
        SensorType::FRUState => FRU_STATE,
        _ => return None,
    };
    Some(table)
}

/// Look up the description and severity of an event offset.
///
/// Generic event/reading types are resolved through the generic tables,
/// sensor-specific (`0x6F`) events through the table of `sensor_type`.
/// OEM and reserved types have no description.
pub fn event_description(
    event_reading_type: EventReadingTypeCodes,
    sensor_type: SensorType,
    offset: u8,
) -> Option<EventDescription> {
    let table = match event_reading_type {
        EventReadingTypeCodes::SensorSpecific => sensor_specific_table(sensor_type)?,
        other if other.is_generic() => generic_table(u8::from(other))?,
        _ => return None,
    };

    let offset = offset & 0x0F;
    table
        .iter()
        .find(|(o, _, _)| *o == offset)
        .map(|(_, description, severity)| EventDescription {
            description: *description,
            severity: *severity,
        })
}
