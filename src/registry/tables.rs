//! Static bq40z50-R2 command set and status-word bit maps.
//!
//! Every table is contiguous: entry `n` describes bit `n`, reserved bits
//! included.

use super::{BitFieldDescriptor, CommandDescriptor, DisplayFormat, WriteData};

pub static SAFETY_ALERT_BITS: [BitFieldDescriptor; 32] = [
    BitFieldDescriptor::new(0, "CUV", "Cell Undervoltage", "Detected", "Not Detected"),
    BitFieldDescriptor::new(1, "COV", "Cell Overvoltage", "Detected", "Not Detected"),
    BitFieldDescriptor::new(2, "OCC1", "Overcurrent During Charge 1", "Detected", "Not Detected"),
    BitFieldDescriptor::new(3, "OCC2", "Overcurrent During Charge 2", "Detected", "Not Detected"),
    BitFieldDescriptor::new(4, "OCD1", "Overcurrent During Discharge 1", "Detected", "Not Detected"),
    BitFieldDescriptor::new(5, "OCD2", "Overcurrent During Discharge 2", "Detected", "Not Detected"),
    BitFieldDescriptor::new(6, "RSVD", "Reserved", "", ""),
    BitFieldDescriptor::new(7, "AOLDL", "Overload During Discharge Latch", "Detected", "Not Detected"),

    BitFieldDescriptor::new(8, "RSVD", "Reserved", "", ""),
    BitFieldDescriptor::new(9, "ASCCL", "Short-Circuit During Charge Latch", "Detected", "Not Detected"),
    BitFieldDescriptor::new(10, "RSVD", "Reserved", "", ""),
    BitFieldDescriptor::new(11, "ASCDL", "Short-Circuit During Discharge Latch", "Detected", "Not Detected"),
    BitFieldDescriptor::new(12, "OTC", "Overtemperature During Charge", "Detected", "Not Detected"),
    BitFieldDescriptor::new(13, "OTD", "Overtemperature During Discharge", "Detected", "Not Detected"),
    BitFieldDescriptor::new(14, "CUVC", "Cell Undervoltage Compensated", "Detected", "Not Detected"),
    BitFieldDescriptor::new(15, "RSVD", "Reserved", "", ""),

    BitFieldDescriptor::new(16, "OTF", "Overtemperature FET", "Detected", "Not Detected"),
    BitFieldDescriptor::new(17, "RSVD", "Reserved", "", ""),
    BitFieldDescriptor::new(18, "PTO", "Precharge Timeout", "Detected", "Not Detected"),
    BitFieldDescriptor::new(19, "PTOS", "Precharge Timeout Suspend", "Detected", "Not Detected"),
    BitFieldDescriptor::new(20, "CTO", "Charge Timeout", "Detected", "Not Detected"),
    BitFieldDescriptor::new(21, "CTOS", "Charge Timeout Suspend", "Detected", "Not Detected"),
    BitFieldDescriptor::new(22, "OC", "Overcharge", "Detected", "Not Detected"),
    BitFieldDescriptor::new(23, "CHGC", "Overcharging Current", "Detected", "Not Detected"),

    BitFieldDescriptor::new(24, "CHGV", "Overcharging Voltage", "Detected", "Not Detected"),
    BitFieldDescriptor::new(25, "PCHGC", "Over-Precharge Current", "Detected", "Not Detected"),
    BitFieldDescriptor::new(26, "UTC", "Undertemperature During Charge", "Detected", "Not Detected"),
    BitFieldDescriptor::new(27, "UTD", "Undertemperature During Discharge", "Detected", "Not Detected"),
    BitFieldDescriptor::new(28, "COVL", "Cell Overvoltage Latch", "Detected", "Not Detected"),
    BitFieldDescriptor::new(29, "OCDL", "Overcurrent in Discharge", "Detected", "Not Detected"),
    BitFieldDescriptor::new(30, "RSVD", "Reserved", "", ""),
    BitFieldDescriptor::new(31, "RSVD", "Reserved", "", ""),
];

pub static SAFETY_STATUS_BITS: [BitFieldDescriptor; 32] = [
    BitFieldDescriptor::new(0, "CUV", "Cell Undervoltage", "Detected", "Not Detected"),
    BitFieldDescriptor::new(1, "COV", "Cell Overvoltage", "Detected", "Not Detected"),
    BitFieldDescriptor::new(2, "OCC1", "Overcurrent During Charge 1", "Detected", "Not Detected"),
    BitFieldDescriptor::new(3, "OCC2", "Overcurrent During Charge 2", "Detected", "Not Detected"),
    BitFieldDescriptor::new(4, "OCD1", "Overcurrent During Discharge 1", "Detected", "Not Detected"),
    BitFieldDescriptor::new(5, "OCD2", "Overcurrent During Discharge 2", "Detected", "Not Detected"),
    BitFieldDescriptor::new(6, "AOLD", "Overload During Discharge", "Detected", "Not Detected"),
    BitFieldDescriptor::new(7, "AOLDL", "Overload During Discharge Latch", "Detected", "Not Detected"),

    BitFieldDescriptor::new(8, "ASCC", "Short-circuit During Charge", "Detected", "Not Detected"),
    BitFieldDescriptor::new(9, "ASCCL", "Short-circuit During Charge Latch", "Detected", "Not Detected"),
    BitFieldDescriptor::new(10, "ASCD", "Short-circuit During Discharge", "Detected", "Not Detected"),
    BitFieldDescriptor::new(11, "ASCDL", "Short-circuit During Discharge Latch", "Detected", "Not Detected"),
    BitFieldDescriptor::new(12, "OTC", "Overtemperature During Charge", "Detected", "Not Detected"),
    BitFieldDescriptor::new(13, "OTD", "Overtemperature During Discharge", "Detected", "Not Detected"),
    BitFieldDescriptor::new(14, "CUVC", "Cell Undervoltage Compensated", "Detected", "Not Detected"),
    BitFieldDescriptor::new(15, "RSVD", "Reserved", "", ""),

    BitFieldDescriptor::new(16, "OTF", "Overtemperature FET", "Detected", "Not Detected"),
    BitFieldDescriptor::new(17, "RSVD", "Reserved", "", ""),
    BitFieldDescriptor::new(18, "PTO", "Precharge Timeout", "Detected", "Not Detected"),
    BitFieldDescriptor::new(19, "RSVD", "Reserved", "", ""),
    BitFieldDescriptor::new(20, "CTO", "Charge Timeout", "Detected", "Not Detected"),
    BitFieldDescriptor::new(21, "RSVD", "Reserved", "", ""),
    BitFieldDescriptor::new(22, "OC", "Overcharge", "Detected", "Not Detected"),
    BitFieldDescriptor::new(23, "CHGC", "Overcharging Current", "Detected", "Not Detected"),

    BitFieldDescriptor::new(24, "CHGV", "Overcharging Voltage", "Detected", "Not Detected"),
    BitFieldDescriptor::new(25, "PCHGC", "Over-Precharge Current", "Detected", "Not Detected"),
    BitFieldDescriptor::new(26, "UTC", "Undertemperature During Charge", "Detected", "Not Detected"),
    BitFieldDescriptor::new(27, "UTD", "Undertemperature During Discharge", "Detected", "Not Detected"),
    BitFieldDescriptor::new(28, "COVL", "Cell Overvoltage Latch", "Detected", "Not Detected"),
    BitFieldDescriptor::new(29, "OCDL", "Overcurrent in Discharge", "Detected", "Not Detected"),
    BitFieldDescriptor::new(30, "RSVD", "Reserved", "", ""),
    BitFieldDescriptor::new(31, "RSVD", "Reserved", "", ""),
];

pub static PF_ALERT_BITS: [BitFieldDescriptor; 32] = [
    BitFieldDescriptor::new(0, "SUV", "Safety Cell Undervoltage Failure", "Detected", "Not Detected"),
    BitFieldDescriptor::new(1, "SOV", "Safety Cell Overvoltage Failure", "Detected", "Not Detected"),
    BitFieldDescriptor::new(2, "SOCC", "Safety Overcurrent in Charge", "Detected", "Not Detected"),
    BitFieldDescriptor::new(3, "SOCD", "Safety Overcurrent in Discharge", "Detected", "Not Detected"),
    BitFieldDescriptor::new(4, "SOT", "Safety Overtemperature Cell Failure", "Detected", "Not Detected"),
    BitFieldDescriptor::new(5, "COVL", "Cell Overvoltage Latch", "Detected", "Not Detected"),
    BitFieldDescriptor::new(6, "SOTF", "Safety Overtemperature FET Failure", "Detected", "Not Detected"),
    BitFieldDescriptor::new(7, "QIM", "QMax Imbalance Failure", "Detected", "Not Detected"),

    BitFieldDescriptor::new(8, "CB", "Cell Balancing Failure", "Detected", "Not Detected"),
    BitFieldDescriptor::new(9, "IMP", "Impedance Failure", "Detected", "Not Detected"),
    BitFieldDescriptor::new(10, "CD", "Capacity Degradation Failure", "Detected", "Not Detected"),
    BitFieldDescriptor::new(11, "VIMR", "Voltage Imbalance At Rest", "Detected", "Not Detected"),
    BitFieldDescriptor::new(12, "VIMA", "Voltage Imbalance While Active", "Detected", "Not Detected"),
    BitFieldDescriptor::new(13, "AOLDL", "Overload in Discharge", "Detected", "Not Detected"),
    BitFieldDescriptor::new(14, "ASCCL", "Short Circuit in Charge", "Detected", "Not Detected"),
    BitFieldDescriptor::new(15, "ASCDL", "Short Circuit in Discharge", "Detected", "Not Detected"),

    BitFieldDescriptor::new(16, "CFETF", "Charge FET Failure", "Detected", "Not Detected"),
    BitFieldDescriptor::new(17, "DFETF", "Discharge FET Failure", "Detected", "Not Detected"),
    BitFieldDescriptor::new(18, "OCDL", "Overcurrent in Discharge", "Detected", "Not Detected"),
    BitFieldDescriptor::new(19, "FUSE", "Chemical Fuse Failure", "Detected", "Not Detected"),
    BitFieldDescriptor::new(20, "AFER", "AFE Register Failure", "Detected", "Not Detected"),
    BitFieldDescriptor::new(21, "AFEC", "AFE Communication Failure", "Detected", "Not Detected"),
    BitFieldDescriptor::new(22, "2LVL", "Second Level Protector Failure", "Detected", "Not Detected"),
    BitFieldDescriptor::new(23, "RSVD", "Reserved", "", ""),

    BitFieldDescriptor::new(24, "RSVD", "Reserved", "", ""),
    BitFieldDescriptor::new(25, "RSVD", "Reserved", "", ""),
    BitFieldDescriptor::new(26, "RSVD", "Reserved", "", ""),
    BitFieldDescriptor::new(27, "RSVD", "Reserved", "", ""),
    BitFieldDescriptor::new(28, "TS1", "Open Thermistor TS1 Failure", "Detected", "Not Detected"),
    BitFieldDescriptor::new(29, "TS2", "Open Thermistor TS2 Failure", "Detected", "Not Detected"),
    BitFieldDescriptor::new(30, "TS3", "Open Thermistor TS3 Failure", "Detected", "Not Detected"),
    BitFieldDescriptor::new(31, "TS4", "Open Thermistor TS4 Failure", "Detected", "Not Detected"),
];

pub static PF_STATUS_BITS: [BitFieldDescriptor; 32] = [
    BitFieldDescriptor::new(0, "SUV", "Safety Cell Undervoltage Failure", "Detected", "Not Detected"),
    BitFieldDescriptor::new(1, "SOV", "Safety Cell Overvoltage Failure", "Detected", "Not Detected"),
    BitFieldDescriptor::new(2, "SOCC", "Safety Overcurrent in Charge", "Detected", "Not Detected"),
    BitFieldDescriptor::new(3, "SOCD", "Safety Overcurrent in Discharge", "Detected", "Not Detected"),
    BitFieldDescriptor::new(4, "SOT", "Safety Overtemperature Cell Failure", "Detected", "Not Detected"),
    BitFieldDescriptor::new(5, "COVL", "Cell Overvoltage Latch", "Detected", "Not Detected"),
    BitFieldDescriptor::new(6, "SOTF", "Safety Overtemperature FET Failure", "Detected", "Not Detected"),
    BitFieldDescriptor::new(7, "QIM", "QMax Imbalance Failure", "Detected", "Not Detected"),

    BitFieldDescriptor::new(8, "CB", "Cell Balancing Failure", "Detected", "Not Detected"),
    BitFieldDescriptor::new(9, "IMP", "Impedance Failure", "Detected", "Not Detected"),
    BitFieldDescriptor::new(10, "CD", "Capacity Degradation Failure", "Detected", "Not Detected"),
    BitFieldDescriptor::new(11, "VIMR", "Voltage Imbalance At Rest", "Detected", "Not Detected"),
    BitFieldDescriptor::new(12, "VIMA", "Voltage Imbalance While Active", "Detected", "Not Detected"),
    BitFieldDescriptor::new(13, "AOLDL", "Overload in Discharge", "Detected", "Not Detected"),
    BitFieldDescriptor::new(14, "ASCCL", "Short Circuit in Charge", "Detected", "Not Detected"),
    BitFieldDescriptor::new(15, "ASCDL", "Short Circuit in Discharge", "Detected", "Not Detected"),

    BitFieldDescriptor::new(16, "CFETF", "Charge FET Failure", "Detected", "Not Detected"),
    BitFieldDescriptor::new(17, "DFETF", "Discharge FET Failure", "Detected", "Not Detected"),
    BitFieldDescriptor::new(18, "OCDL", "Overcurrent in Discharge", "Detected", "Not Detected"),
    BitFieldDescriptor::new(19, "FUSE", "Chemical Fuse Failure", "Detected", "Not Detected"),
    BitFieldDescriptor::new(20, "AFER", "AFE Register Failure", "Detected", "Not Detected"),
    BitFieldDescriptor::new(21, "AFEC", "AFE Communication Failure", "Detected", "Not Detected"),
    BitFieldDescriptor::new(22, "2LVL", "Second Level Protector Failure", "Detected", "Not Detected"),
    BitFieldDescriptor::new(23, "PTC", "PTC Failure", "Detected", "Not Detected"),

    BitFieldDescriptor::new(24, "IFC", "Instruction Flash Checksum Failure", "Detected", "Not Detected"),
    BitFieldDescriptor::new(25, "RSVD", "Reserved", "", ""),
    BitFieldDescriptor::new(26, "DFW", "Data Flash Wearout Failure", "Detected", "Not Detected"),
    BitFieldDescriptor::new(27, "RSVD", "Reserved", "", ""),
    BitFieldDescriptor::new(28, "TS1", "Open Thermistor TS1 Failure", "Detected", "Not Detected"),
    BitFieldDescriptor::new(29, "TS2", "Open Thermistor TS2 Failure", "Detected", "Not Detected"),
    BitFieldDescriptor::new(30, "TS3", "Open Thermistor TS3 Failure", "Detected", "Not Detected"),
    BitFieldDescriptor::new(31, "TS4", "Open Thermistor TS4 Failure", "Detected", "Not Detected"),
];

pub static OPERATION_STATUS_BITS: [BitFieldDescriptor; 32] = [
    BitFieldDescriptor::new(0, "PRES", "System Present (low)", "Active", "Inactive"),
    BitFieldDescriptor::new(1, "DSG", "Discharge FET status", "Active", "Inactive"),
    BitFieldDescriptor::new(2, "CHG", "Charge FET status", "Active", "Inactive"),
    BitFieldDescriptor::new(3, "PCHG", "Precharge FET status", "Active", "Inactive"),
    BitFieldDescriptor::new(4, "RSVD", "Reserved", "", ""),
    BitFieldDescriptor::new(5, "FUSE", "Fuse status", "Active", "Inactive"),
    BitFieldDescriptor::new(6, "RSVD", "Reserved", "", ""),
    BitFieldDescriptor::new(7, "BTP_INT", "Battery Trip Point Interrupt", "Active", "Inactive"),

    BitFieldDescriptor::new(8, "SEC0", "Security Mode Bit 0 (00-Reserved 01-FullAccess 10-Unsealed 11-Sealed)", "", ""),
    BitFieldDescriptor::new(9, "SEC1", "Security Mode Bit 1 (00-Reserved 01-FullAccess 10-Unsealed 11-Sealed)", "", ""),
    BitFieldDescriptor::new(10, "SDV", "Shutdown due to low pack voltage", "Active", "Inactive"),
    BitFieldDescriptor::new(11, "SS", "Safety Status (OR of all safety bits)", "Active", "Inactive"),
    BitFieldDescriptor::new(12, "PF", "Permanent Failure mode", "Active", "Inactive"),
    BitFieldDescriptor::new(13, "XDSG", "Discharging disabled", "Active", "Inactive"),
    BitFieldDescriptor::new(14, "XCHG", "Charging disabled", "Active", "Inactive"),
    BitFieldDescriptor::new(15, "SLEEP", "Sleep mode conditions met", "Active", "Inactive"),

    BitFieldDescriptor::new(16, "SDM", "Shutdown via command", "Active", "Inactive"),
    BitFieldDescriptor::new(17, "LED", "LED Display status", "On", "Off"),
    BitFieldDescriptor::new(18, "AUTH", "Authentication in progress", "Active", "Inactive"),
    BitFieldDescriptor::new(19, "CALM", "Auto CC Offset Calibration (MAC)", "Active", "Inactive"),
    BitFieldDescriptor::new(20, "CAL", "Calibration output (ADC/CC)", "Available", "Not available"),
    BitFieldDescriptor::new(21, "CAL_OFFSET", "Calibration Output (Shorted CC)", "Available", "Not available"),
    BitFieldDescriptor::new(22, "XL", "400-kHz SMBus mode", "Active", "Inactive"),
    BitFieldDescriptor::new(23, "SLEEPM", "SLEEP mode via command", "Active", "Inactive"),

    BitFieldDescriptor::new(24, "INIT", "Initialization after full reset", "Active", "Inactive"),
    BitFieldDescriptor::new(25, "SMBLCAL", "Auto CC Calibration (bus low)", "Started", "Not started"),
    BitFieldDescriptor::new(26, "SLPAD", "ADC Measurement in Sleep", "Active", "Inactive"),
    BitFieldDescriptor::new(27, "SLPCC", "CC Measurement in Sleep", "Active", "Inactive"),
    BitFieldDescriptor::new(28, "CB", "Cell Balancing status", "Active", "Inactive"),
    BitFieldDescriptor::new(29, "EMSHUT", "Emergency FET Shutdown", "Active", "Inactive"),
    BitFieldDescriptor::new(30, "RSVD", "Reserved", "", ""),
    BitFieldDescriptor::new(31, "RSVD", "Reserved", "", ""),
];

pub static MANUFACTURING_STATUS_BITS: [BitFieldDescriptor; 16] = [
    BitFieldDescriptor::new(0, "PCHG", "Precharge FET Test.", "Active", "Disabled"),
    BitFieldDescriptor::new(1, "CHG", "Charge FET Test.", "Active", "Disabled"),
    BitFieldDescriptor::new(2, "DSG", "Discharge FET Test.", "Active", "Disabled"),
    BitFieldDescriptor::new(3, "GAUGE", "Gas Gauging.", "Enabled", "Disabled"),
    BitFieldDescriptor::new(4, "FET", "All FET Action.", "Enabled", "Disabled"),
    BitFieldDescriptor::new(5, "LF", "Lifetime data collection.", "Enabled", "Disabled"),
    BitFieldDescriptor::new(6, "PF", "Permanent Failure functionality.", "Enabled", "Disabled"),
    BitFieldDescriptor::new(7, "BBR", "Black box recorder.", "Enabled", "Disabled"),

    BitFieldDescriptor::new(8, "FUSE", "FUSE action.", "Enabled", "Disabled"),
    BitFieldDescriptor::new(9, "LED", "LED Display.", "On", "Off"),
    BitFieldDescriptor::new(10, "RSVD", "Reserved", "Enabled", "Disabled"),
    BitFieldDescriptor::new(11, "RSVD", "Reserved", "Enabled", "Disabled"),
    BitFieldDescriptor::new(12, "RSVD", "Reserved", "Enabled", "Disabled"),
    BitFieldDescriptor::new(13, "RSVD", "Reserved", "Enabled", "Disabled"),
    BitFieldDescriptor::new(14, "LT_TS", "Lifetime Speed Up mode.", "Enabled", "Disabled"),
    BitFieldDescriptor::new(15, "CALTS", "CAL ADC or CC output on ManufacturerData().", "Enabled", "Disabled"),
];

/// Command table. Sub-command codes and payloads are the controller's wire contract.
pub static MBA_COMMANDS: &[CommandDescriptor] = &[
    CommandDescriptor::read("DeviceType", 0x0001, DisplayFormat::Hex, &[],
        "Identifies the battery device type to verify model and family compatibility."),
    CommandDescriptor::read("FirmwareVersion", 0x0002, DisplayFormat::Hex, &[],
        "Reports the firmware version running on the battery controller, useful for compatibility and updates."),
    CommandDescriptor::read("HardwareVersion", 0x0003, DisplayFormat::Hex, &[],
        "Indicates the hardware revision of the device to identify physical variations or improvements."),
    CommandDescriptor::write("PermanentFailure", 0x0024, WriteData::EMPTY,
        "This command enables/disables Permanent Failure to help streamline production testing."),
    CommandDescriptor::write("LifetimeDataReset", 0x0028, WriteData::EMPTY,
        "Resets accumulated lifetime data such as cycle count and usage statistics."),
    CommandDescriptor::write("PermanentFailureDataReset", 0x0029, WriteData::EMPTY,
        "Resets permanent failure data flags to clear fault status."),
    CommandDescriptor::write("BlackBoxRecorderReset", 0x002A, WriteData::EMPTY,
        "Resets the black box event recorder to clear logged fault history."),
    CommandDescriptor::write("SealDevice", 0x0030, WriteData::EMPTY,
        "Seals the device to prevent further modifications to configuration or data."),
    CommandDescriptor::write("DeviceReset", 0x0041, WriteData::EMPTY,
        "Command to reset the device, reinitializing all registers and states."),
    CommandDescriptor::read("SafetyAlert", 0x0050, DisplayFormat::Binary, &SAFETY_ALERT_BITS,
        "Returns current safety alert flags indicating critical conditions such as overvoltage or overtemperature."),
    CommandDescriptor::read("SafetyStatus", 0x0051, DisplayFormat::Binary, &SAFETY_STATUS_BITS,
        "Reports the current safety status of the device, showing ongoing safety-related events."),
    CommandDescriptor::read("PFAlert", 0x0052, DisplayFormat::Binary, &PF_ALERT_BITS,
        "Indicates permanent failure alerts that require immediate attention or servicing."),
    CommandDescriptor::read("PFStatus", 0x0053, DisplayFormat::Binary, &PF_STATUS_BITS,
        "Reports the status of permanent failure flags for battery health monitoring."),
    CommandDescriptor::read("OperationStatus", 0x0054, DisplayFormat::Binary, &OPERATION_STATUS_BITS,
        "General operational status reporting the current mode and condition of the device."),
    CommandDescriptor::read("ManufacturingStatus", 0x0057, DisplayFormat::Binary, &MANUFACTURING_STATUS_BITS,
        "Contains informations about activated modes (PF, etc ..)"),
    CommandDescriptor::write("UnsealKey1", 0x7EE0, WriteData::EMPTY,
        "Key to change security mode from SEALED to UNSEALED 1/2. The two words must be sent within 4 s."),
    CommandDescriptor::write("UnsealKey2", 0xCCDF, WriteData::EMPTY,
        "Key to change security mode from SEALED to UNSEALED 2/2. The two words must be sent within 4 s."),
    CommandDescriptor::read("PF2RegisterRead", 0x4062, DisplayFormat::Hex, &[],
        "Custom DJI register key where we can find the PF2 flag."),
    // Payload taken from the DJI battery recovery tool; the controller accepts it as a PF2 clear.
    CommandDescriptor::write("ClearPF2", 0x4062, WriteData::new([0x01, 0x23, 0x45, 0x67]),
        "Overwrite the custom DJI register key where we can find the PF2 flag."),
];
