//! Unit tests for the enable / disable / reset register sequences

use crate::common::{create_irq_driver, create_polled_driver, MockDelay};
use kxtj9::{BoardVariant, PlatformData, PowerState, Resolution};

#[test]
fn test_enable_polled_sequence() {
    let (mut driver, interface) = create_polled_driver(BoardVariant::Me372cg);

    driver.enable().unwrap();

    assert_eq!(
        interface.writes(),
        vec![
            (0x1B, 0x00), // stand-by
            (0x1B, 0x80), // measuring
            (0x1B, 0x00), // ODR update: stand-by
            (0x21, 0x00), // 200 ms -> 12.5 Hz
            (0x1B, 0x80),
        ]
    );
    assert_eq!(interface.read_count(0x1A), 0);
    assert!(driver.is_enabled());
    assert_eq!(driver.power_state(), PowerState::On);
    assert_eq!(driver.ctrl_reg1(), 0x80);
}

#[test]
fn test_enable_irq_sequence() {
    let (mut driver, interface, _irq) =
        create_irq_driver(PlatformData::new(BoardVariant::Me175cg));

    driver.enable().unwrap();

    assert_eq!(
        interface.writes(),
        vec![
            (0x1B, 0x00),
            (0x1E, 0x38), // interrupt pin config
            (0x1B, 0xE0), // measuring, 12-bit, data ready
            (0x1B, 0x00),
            (0x21, 0x00),
            (0x1B, 0xE0),
        ]
    );
    // stale interrupt cleared once
    assert_eq!(interface.read_count(0x1A), 1);
    assert!(driver.is_enabled());
}

#[test]
fn test_disable_clears_power_bit() {
    let (mut driver, interface) = create_polled_driver(BoardVariant::Pf400cg);
    driver.enable().unwrap();
    interface.clear_operations();

    driver.disable();

    assert_eq!(interface.writes(), vec![(0x1B, 0x40)]);
    assert!(!driver.is_enabled());
    assert_eq!(driver.power_state(), PowerState::Off);
}

#[test]
fn test_power_off_keeps_enabled_flag() {
    let (mut driver, interface) = create_polled_driver(BoardVariant::Me372cg);
    driver.enable().unwrap();
    interface.clear_operations();

    driver.power_off();

    assert_eq!(interface.writes(), vec![(0x1B, 0x00)]);
    assert!(driver.is_enabled());
    assert_eq!(driver.power_state(), PowerState::Off);
}

#[test]
fn test_enable_by_orientation_skips_rate_and_flag() {
    let (mut driver, interface, _irq) =
        create_irq_driver(PlatformData::new(BoardVariant::Me372cg));

    driver.enable_by_orientation().unwrap();

    assert_eq!(
        interface.writes(),
        vec![(0x1B, 0x00), (0x1E, 0x38), (0x1B, 0xA0)]
    );
    assert_eq!(interface.read_count(0x1A), 1);
    assert!(!driver.is_enabled());
    assert_eq!(driver.power_state(), PowerState::On);
}

#[test]
fn test_reset_sequence() {
    let (mut driver, interface) = create_polled_driver(BoardVariant::Me372cg);
    let mut delay = MockDelay::default();
    driver.set_poll_interval(10).unwrap();
    interface.clear_operations();

    driver.reset(&mut delay).unwrap();

    assert_eq!(
        interface.writes(),
        vec![
            (0x1D, 0x80), // soft reset
            (0x1B, 0x00),
            (0x21, 0x04), // rate restored from the shadow
            (0x1B, 0x80),
        ]
    );
    assert_eq!(delay.total_ms(), 50);
    assert!(driver.is_enabled());
    assert_eq!(driver.power_state(), PowerState::On);
}

#[test]
fn test_reset_irq_mode_restores_interrupts() {
    let (mut driver, interface, _irq) =
        create_irq_driver(PlatformData::new(BoardVariant::Me372cg));
    let mut delay = MockDelay::default();

    driver.reset(&mut delay).unwrap();

    assert_eq!(
        interface.writes(),
        vec![
            (0x1D, 0x80),
            (0x1B, 0x00),
            (0x1E, 0x38),
            (0x21, 0x00),
            (0x1B, 0xA0),
        ]
    );
    assert_eq!(interface.read_count(0x1A), 1);
}

#[test]
fn test_set_resolution() {
    let (mut driver, interface) = create_polled_driver(BoardVariant::Me372cg);

    driver.set_resolution(Resolution::Bits12).unwrap();
    assert_eq!(driver.ctrl_reg1(), 0x40);

    driver.set_resolution(Resolution::Bits8).unwrap();
    assert_eq!(driver.ctrl_reg1(), 0x00);

    assert_eq!(interface.writes(), vec![(0x1B, 0x40), (0x1B, 0x00)]);
}

#[test]
fn test_enable_twice_rewrites_hardware() {
    let (mut driver, interface) = create_polled_driver(BoardVariant::Me372cg);
    driver.enable().unwrap();
    interface.clear_operations();

    driver.enable().unwrap();

    // every enable re-syncs from the shadows, starting in stand-by
    assert_eq!(interface.writes().first(), Some(&(0x1B, 0x00)));
    assert_eq!(interface.writes().last(), Some(&(0x1B, 0x80)));
    assert!(driver.is_enabled());
}
