//! Integration tests for the complete driver lifecycle

use crate::common::{MockDelay, MockInterface, MockIrq};
use kxtj9::{
    Attribute, BoardVariant, BuildType, CalibrationStatus, ChipVariant, InputEvent, Kxtj9,
    NoCalibration, NoIrq, PlatformData, PowerState, ProjectId, ProjectMode, SharedSensorState,
    SuspendState,
};

#[test]
fn test_polled_lifecycle() {
    static SHARED: SharedSensorState = SharedSensorState::new();
    let interface = MockInterface::new();
    interface.set_who_am_i(0x09);
    let sink = interface.sink();
    let mut delay = MockDelay::default();

    let mut driver = Kxtj9::probe(
        interface.clone(),
        PlatformData::new(BoardVariant::Pf400cg),
        sink,
        &SHARED,
        None::<NoIrq>,
    )
    .unwrap();
    assert_eq!(driver.chip(), ChipVariant::Kxtj2);
    assert_eq!(driver.ctrl_reg1(), 0x40);

    driver.enable().unwrap();
    assert_eq!(driver.ctrl_reg1(), 0xC0);
    assert_eq!(interface.get_register(0x1B), 0xC0);

    // load one-plane factory calibration
    let mut file: &[u8] = b"24&1034 44&1010 64&-1040\n";
    let status = driver.reload_calibration(&mut file).unwrap();
    assert_eq!(status, CalibrationStatus::Loaded);
    assert_eq!(driver.calibration().offset, [10, -14, -16]);

    interface.clear_operations();
    interface.set_sample_sequence(&[[110, -14, -1040], [112, -14, -1040]]);
    let first = driver.poll(200, &mut delay).unwrap();
    let second = driver.poll(200, &mut delay).unwrap();

    assert_eq!((first.x, first.y, first.z), (-100, 0, 1024));
    assert_eq!((second.x, second.y, second.z), (-102, 0, 1024));
    assert_eq!(interface.events().len(), 8);
    assert_eq!(interface.events()[7], InputEvent::Sync);
    assert_eq!(SHARED.orientation(), (-10, 0, 98));

    // host suspend / resume round trip
    driver.suspend();
    assert_eq!(driver.suspend_state(), SuspendState::SuspendedWasEnabled);
    assert_eq!(interface.get_register(0x1B), 0x40);

    driver.resume().unwrap();
    assert!(driver.is_enabled());
    assert_eq!(interface.get_register(0x1B), 0xC0);

    let (released, _sink, irq) = driver.remove();
    assert!(irq.is_none());
    assert_eq!(released.get_register(0x1B), 0x40);
}

#[test]
fn test_interrupt_lifecycle_on_eng_build() {
    static SHARED: SharedSensorState = SharedSensorState::new();
    let interface = MockInterface::new();
    interface.set_who_am_i(0x09);
    let irq = MockIrq::default();
    let mut delay = MockDelay::default();
    let platform = PlatformData {
        build: BuildType::Eng,
        ..PlatformData::new(BoardVariant::A400cg)
    };

    let mut driver = Kxtj9::probe(
        interface.clone(),
        platform,
        interface.sink(),
        &SHARED,
        Some(irq.clone()),
    )
    .unwrap();
    assert_eq!(driver.project_mode(), ProjectMode::Eng);
    assert_eq!(driver.project_id(), ProjectId::A400cgKxtj2);
    assert_eq!(driver.int_ctrl(), 0x38);

    driver.store(Attribute::Enable, "1\n").unwrap();
    assert_eq!(driver.power_state(), PowerState::On);
    assert_eq!(interface.get_register(0x1E), 0x38);

    interface.set_sample(0, 0, 1024);
    interface.clear_operations();
    let sample = driver.handle_interrupt(&mut delay).unwrap();
    assert_eq!((sample.x, sample.y, sample.z), (0, 0, -1024));
    assert_eq!(interface.read_count(0x1A), 1);

    driver.suspend();
    assert!(irq.is_masked());
    driver.resume().unwrap();
    assert!(!irq.is_masked());

    // no calibration storage on this board
    assert!(driver
        .show(Attribute::Calibration, &mut delay, &mut NoCalibration)
        .is_err());

    let (_interface, _sink, line) = driver.remove();
    assert!(line.is_some());
    assert_eq!(interface.get_register(0x1B) & 0x80, 0);
}
