//! Unit tests for probe and chip identification

use crate::common::{create_irq_driver, shared_state, MockError, MockInterface, MockIrq, Operation};
use kxtj9::{
    BoardVariant, BuildType, ChipVariant, Error, HwRevision, Kxtj9, NoIrq, PlatformData,
    ProjectId, ProjectMode,
};

fn probe_polled(
    interface: &MockInterface,
    board: BoardVariant,
) -> Result<Kxtj9<'static, MockInterface, crate::common::mock_interface::MockSink>, Error<MockError>>
{
    Kxtj9::probe(
        interface.clone(),
        PlatformData::new(board),
        interface.sink(),
        shared_state(),
        None::<NoIrq>,
    )
}

#[test]
fn test_probe_kxtj9() {
    let interface = MockInterface::new();
    let driver = probe_polled(&interface, BoardVariant::Me372cg).unwrap();

    assert_eq!(driver.chip(), ChipVariant::Kxtj9);
    assert_eq!(driver.chip().name(), "kxtj9");
    assert!(!driver.is_enabled());
    assert!(!driver.is_irq_mode());
    assert_eq!(driver.poll_interval_ms(), 200);
}

#[test]
fn test_probe_kxtj2() {
    let interface = MockInterface::new();
    interface.set_who_am_i(0x09);
    let driver = probe_polled(&interface, BoardVariant::Me175cg).unwrap();

    assert_eq!(driver.chip(), ChipVariant::Kxtj2);
    assert_eq!(driver.chip().name(), "kxtj2");
}

#[test]
fn test_probe_accepts_legacy_identity() {
    for who_am_i in [0x04, 0x07, 0x0F] {
        let interface = MockInterface::new();
        interface.set_who_am_i(who_am_i);
        let driver = probe_polled(&interface, BoardVariant::Me372cg).unwrap();
        assert_eq!(driver.chip(), ChipVariant::Legacy(who_am_i));
    }
}

#[test]
fn test_probe_rejects_unknown_identity() {
    let interface = MockInterface::new();
    interface.set_who_am_i(0x05);

    let result = probe_polled(&interface, BoardVariant::Me372cg);
    assert!(matches!(result, Err(Error::InvalidDevice(0x05))));
}

#[test]
fn test_verify_always_powers_off() {
    // Success
    let interface = MockInterface::new();
    probe_polled(&interface, BoardVariant::Me372cg).unwrap();
    assert_eq!(
        interface.operations(),
        vec![
            Operation::ReadRegister {
                address: 0x0F,
                value: 0x08
            },
            Operation::WriteRegister {
                address: 0x1B,
                value: 0x00
            },
        ]
    );

    // Wrong identity
    let interface = MockInterface::new();
    interface.set_who_am_i(0x33);
    assert!(probe_polled(&interface, BoardVariant::Me372cg).is_err());
    assert_eq!(interface.writes(), vec![(0x1B, 0x00)]);

    // Bus failure
    let interface = MockInterface::new();
    interface.fail_next_read();
    let result = probe_polled(&interface, BoardVariant::Me372cg);
    assert!(matches!(result, Err(Error::Bus(MockError::Communication))));
    assert_eq!(interface.writes(), vec![(0x1B, 0x00)]);
}

#[test]
fn test_probe_polled_shadows() {
    let interface = MockInterface::new();
    let driver = probe_polled(&interface, BoardVariant::Me372cg).unwrap();
    assert_eq!(driver.ctrl_reg1(), 0x00);
    assert_eq!(driver.int_ctrl(), 0x00);

    // KXTJ2 boards start in 12-bit mode
    let interface = MockInterface::new();
    let driver = probe_polled(&interface, BoardVariant::Pf400cg).unwrap();
    assert_eq!(driver.ctrl_reg1(), 0x40);
}

#[test]
fn test_probe_irq_mode_shadows() {
    let (driver, _interface, _irq) = create_irq_driver(PlatformData::new(BoardVariant::Me372cg));

    assert!(driver.is_irq_mode());
    // IEN | IEA | IEL
    assert_eq!(driver.int_ctrl(), 0x38);
    // DRDYE, ±2 g
    assert_eq!(driver.ctrl_reg1(), 0x20);
    assert_eq!(driver.project_mode(), ProjectMode::Normal);
    assert_eq!(driver.project_id(), ProjectId::Me372cgKxtj9);
}

#[test]
fn test_probe_eng_build_switches_project() {
    let platform = PlatformData {
        build: BuildType::Eng,
        ..PlatformData::new(BoardVariant::A400cg)
    };
    let (driver, _interface, _irq) = create_irq_driver(platform);

    assert_eq!(driver.project_mode(), ProjectMode::Eng);
    assert_eq!(driver.project_id(), ProjectId::A400cgKxtj2);
    assert_eq!(driver.ctrl_reg1(), 0x60);
}

#[test]
fn test_probe_eng_build_me372cl_only_after_sr() {
    let platform = PlatformData {
        build: BuildType::Eng,
        ..PlatformData::new(BoardVariant::Me372cl(HwRevision::Sr2))
    };
    let (driver, _interface, _irq) = create_irq_driver(platform);
    assert_eq!(driver.project_mode(), ProjectMode::Normal);
    assert_eq!(driver.ctrl_reg1(), 0x20);

    let platform = PlatformData {
        build: BuildType::Eng,
        ..PlatformData::new(BoardVariant::Me372cl(HwRevision::Er))
    };
    let (driver, _interface, _irq) = create_irq_driver(platform);
    assert_eq!(driver.project_mode(), ProjectMode::Eng);
    assert_eq!(driver.project_id(), ProjectId::Me175cgKxtj2);
    assert_eq!(driver.ctrl_reg1(), 0x60);
}

#[test]
fn test_probe_eng_build_ignored_when_polled() {
    let interface = MockInterface::new();
    let driver = Kxtj9::probe(
        interface.clone(),
        PlatformData {
            build: BuildType::Eng,
            ..PlatformData::new(BoardVariant::Me175cg)
        },
        interface.sink(),
        shared_state(),
        None::<MockIrq>,
    )
    .unwrap();

    assert_eq!(driver.project_mode(), ProjectMode::Normal);
    assert_eq!(driver.project_id(), ProjectId::Me372cgKxtj9);
}

#[test]
fn test_probe_layout_follows_board() {
    let interface = MockInterface::new();
    let driver = probe_polled(&interface, BoardVariant::Me372cl(HwRevision::Sr1)).unwrap();
    assert_eq!(driver.layout(), kxtj9::AxisLayout::EvbMe372cl);
    assert_eq!(driver.board().device_name(), "kxtj9");
}
