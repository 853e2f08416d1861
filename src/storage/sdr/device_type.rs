//! Device Type Codes used by the device locator records.
//!
//! Reference: IPMI 2.0 Specification, Table 43-12 "IPMB/I2C Device Type Codes"

macro_rules! device_type {
    {
        $($name:ident = [$value:literal, $desc:literal],)*
    } => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum DeviceType {
            $($name,)*
            Oem(u8),
            Reserved(u8),
        }

        impl DeviceType {
            pub fn description(&self) -> &'static str {
                match self {
                    $(Self::$name => $desc,)*
                    Self::Oem(_) => "OEM specified device",
                    Self::Reserved(_) => "Reserved",
                }
            }
        }

        impl From<u8> for DeviceType {
            fn from(value: u8) -> Self {
                match value {
                    $($value => Self::$name,)*
                    0xC0..=0xFF => Self::Oem(value),
                    v => Self::Reserved(v),
                }
            }
        }
    };
}

device_type! {
    Ds1624 = [0x02, "DS1624 temperature sensor / EEPROM or equivalent"],
    Ds1621 = [0x03, "DS1621 temperature sensor or equivalent"],
    Lm75 = [0x04, "LM75 temperature sensor or equivalent"],
    Heceta = [0x05, "Heceta ASIC or similar"],
    Eeprom24C01 = [0x08, "EEPROM, 24C01 or equivalent"],
    Eeprom24C02 = [0x09, "EEPROM, 24C02 or equivalent"],
    Eeprom24C04 = [0x0A, "EEPROM, 24C04 or equivalent"],
    Eeprom24C08 = [0x0B, "EEPROM, 24C08 or equivalent"],
    Eeprom24C16 = [0x0C, "EEPROM, 24C16 or equivalent"],
    Eeprom24C17 = [0x0D, "EEPROM, 24C17 or equivalent"],
    Eeprom24C32 = [0x0E, "EEPROM, 24C32 or equivalent"],
    Eeprom24C64 = [0x0F, "EEPROM, 24C64 or equivalent"],
    FruInventoryBehindController = [0x10, "FRU Inventory Device behind management controller"],
    Pcf8570 = [0x14, "PCF 8570 256 byte RAM or equivalent"],
    Pcf8573 = [0x15, "PCF 8573 clock/calendar or equivalent"],
    Pcf8574A = [0x16, "PCF 8574A I/O Port or equivalent"],
    Pcf8583 = [0x17, "PCF 8583 clock/calendar or equivalent"],
    Pcf8593 = [0x18, "PCF 8593 clock/calendar or equivalent"],
    ClockCalendar = [0x19, "Clock calendar, type not specified"],
    Pcf8591 = [0x1A, "PCF 8591 A/D, D/A Converter or equivalent"],
    IoPort = [0x1B, "I/O Port, specific device not specified"],
    AdConverter = [0x1C, "A/D Converter, specific device not specified"],
    DaConverter = [0x1D, "D/A Converter, specific device not specified"],
    AdDaConverter = [0x1E, "A/D, D/A Converter, specific device not specified"],
    LcdController = [0x1F, "LCD Controller/Driver, specific device not specified"],
    CoreLogic = [0x20, "Core Logic (Chip set) Device, specific device not specified"],
    Lmc6874 = [0x21, "LMC6874 Intelligent Battery controller, or equivalent"],
    BatteryController = [0x22, "Intelligent Battery controller, specific device not specified"],
    ComboManagementAsic = [0x23, "Combo Management ASIC, specific device not specified"],
    Maxim1617 = [0x24, "Maxim 1617 Temperature Sensor"],
    Other = [0xBF, "Other/unspecified device"],
}
