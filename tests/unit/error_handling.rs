//! Unit tests for error handling and recovery

use crate::common::{create_irq_driver, create_polled_driver, MockDelay, MockError};
use kxtj9::{BoardVariant, Error, PlatformData, PowerState, Resolution};

#[test]
fn test_enable_failure_rolls_back() {
    let (mut driver, interface) = create_polled_driver(BoardVariant::Me372cg);
    interface.fail_write_at(0x21);

    let result = driver.enable();

    assert!(matches!(result, Err(Error::Bus(MockError::Communication))));
    assert!(!driver.is_enabled());
    assert_eq!(driver.power_state(), PowerState::Off);
    // powered back off after the failure
    assert_eq!(interface.writes().last(), Some(&(0x1B, 0x00)));
    assert_eq!(driver.ctrl_reg1() & 0x80, 0);
}

#[test]
fn test_enable_fails_when_interrupt_clear_fails() {
    let (mut driver, interface, _irq) =
        create_irq_driver(PlatformData::new(BoardVariant::Me372cg));
    interface.fail_read_at(0x1A);

    assert!(driver.enable().is_err());
    assert!(!driver.is_enabled());
    assert_eq!(interface.writes().last(), Some(&(0x1B, 0x20)));
}

#[test]
fn test_enable_first_write_failure() {
    let (mut driver, interface) = create_polled_driver(BoardVariant::Me372cg);
    interface.fail_next_write();

    assert!(driver.enable().is_err());
    assert!(!driver.is_enabled());
    // only the rollback write reached the device
    assert_eq!(interface.writes(), vec![(0x1B, 0x00)]);
}

#[test]
fn test_disable_failure_is_logged_only() {
    let (mut driver, interface) = create_polled_driver(BoardVariant::Me372cg);
    driver.enable().unwrap();
    interface.fail_all_writes(true);

    driver.disable();

    assert!(!driver.is_enabled());
    // shadow untouched by the failed write
    assert_eq!(driver.ctrl_reg1(), 0x80);

    interface.fail_all_writes(false);
    driver.disable();
    assert_eq!(driver.ctrl_reg1(), 0x00);
}

#[test]
fn test_reset_failure_leaves_sensor_disabled() {
    let (mut driver, interface) = create_polled_driver(BoardVariant::Me372cg);
    let mut delay = MockDelay::default();
    driver.enable().unwrap();
    interface.fail_write_at(0x1D);

    let result = driver.reset(&mut delay);

    assert!(result.is_err());
    assert!(!driver.is_enabled());
    assert_eq!(driver.power_state(), PowerState::Off);
    assert_eq!(delay.total_ms(), 0);
}

#[test]
fn test_failed_reset_still_publishes_sample() {
    let (mut driver, interface) = create_polled_driver(BoardVariant::Me372cg);
    let mut delay = MockDelay::default();
    driver.enable().unwrap();
    interface.set_sample(0, 0, 0);
    interface.fail_write_at(0x1D);
    interface.clear_operations();

    assert!(driver.poll(200, &mut delay).is_ok());
    assert_eq!(interface.events().len(), 4);
}

#[test]
fn test_set_resolution_failure_keeps_shadow() {
    let (mut driver, interface) = create_polled_driver(BoardVariant::Me372cg);
    interface.fail_next_write();

    assert!(driver.set_resolution(Resolution::Bits12).is_err());
    assert_eq!(driver.ctrl_reg1(), 0x00);
}

#[test]
fn test_rate_update_failure_records_interval() {
    let (mut driver, interface) = create_polled_driver(BoardVariant::Me372cg);
    driver.enable().unwrap();
    interface.fail_write_at(0x21);

    assert!(driver.set_poll_interval(10).is_err());

    assert_eq!(driver.poll_interval_ms(), 10);
    // the device was left in stand-by, and the driver says so
    assert!(!driver.is_enabled());
    assert_eq!(driver.power_state(), PowerState::Off);
    assert_eq!(driver.data_ctrl(), 0x00);
}

#[test]
fn test_read_failure_recovery() {
    let (mut driver, interface) = create_polled_driver(BoardVariant::Me372cg);
    interface.fail_next_read();

    assert!(driver.read_who_am_i().is_err());
    assert_eq!(driver.read_who_am_i().unwrap(), 0x08);
}
