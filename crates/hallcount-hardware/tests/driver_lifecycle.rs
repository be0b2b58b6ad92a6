//! Integration tests for EncoderDriver probe/remove
//!
//! These tests bind the driver to platform devices backed by mock hall
//! sensors and exercise the full path from simulated edges through the
//! interrupt task to the attribute interface.

use hallcount_core::CounterSnapshot;
use hallcount_hardware::driver::COMPATIBLE;
use hallcount_hardware::mock::MockHallSensor;
use hallcount_hardware::{
    BoundEncoder, DISTANCE_ATTR, DriverConfig, EncoderDriver, HardwareError,
    InterruptController, PinctrlState, PlatformDevice, RESET_ATTR,
};
use rstest::rstest;
use std::time::Duration;

fn encoder_device(name: &str, irq: u32) -> PlatformDevice {
    PlatformDevice::new(name).with_of_node(COMPATIBLE).with_irq(irq)
}

fn driver() -> (EncoderDriver, InterruptController) {
    let irqs = InterruptController::new();
    (EncoderDriver::new(DriverConfig::default(), irqs.clone()), irqs)
}

/// Wait until the interrupt task has counted up to `expected`.
async fn wait_for_snapshot(encoder: &BoundEncoder, expected: CounterSnapshot) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while encoder.snapshot() != expected {
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("pulses were not counted in time");
}

/// Test the full probe, pulse, show, reset, remove cycle
#[tokio::test]
async fn test_full_lifecycle() {
    let (driver, irqs) = driver();
    let (sensor, handle) = MockHallSensor::new();

    let encoder = driver
        .probe(&encoder_device("encoder.0", 42), sensor)
        .await
        .unwrap();
    assert!(irqs.is_claimed(42));
    assert_eq!(encoder.attributes().show(DISTANCE_ATTR).unwrap(), "0");

    handle.send_pulses(193).await.unwrap();
    wait_for_snapshot(&encoder, CounterSnapshot::new(1, 1)).await;
    assert_eq!(
        encoder.attributes().show(DISTANCE_ATTR).unwrap(),
        "205268"
    );

    assert_eq!(encoder.attributes().store(RESET_ATTR, "1\n").unwrap(), 2);
    assert_eq!(encoder.attributes().show(DISTANCE_ATTR).unwrap(), "0");

    encoder.remove().await.unwrap();
    assert!(!irqs.is_claimed(42));
}

/// Test that pulses spanning many rotations are all counted
#[tokio::test]
async fn test_burst_larger_than_pulse_queue() {
    let (driver, _irqs) = driver();
    let (sensor, handle) = MockHallSensor::with_config("burst".to_string(), 8);

    let encoder = driver
        .probe(&encoder_device("encoder.0", 1), sensor)
        .await
        .unwrap();

    handle.send_pulses(1000).await.unwrap();
    wait_for_snapshot(&encoder, CounterSnapshot::from_pulse_count(1000)).await;
    assert_eq!(
        encoder.engine().read_distance(),
        CounterSnapshot::from_pulse_count(1000).distance()
    );

    encoder.remove().await.unwrap();
}

/// Test that a rejected reset leaves the distance in place
#[tokio::test]
async fn test_rejected_reset_keeps_distance() {
    let (driver, _irqs) = driver();
    let (sensor, handle) = MockHallSensor::new();

    let encoder = driver
        .probe(&encoder_device("encoder.0", 3), sensor)
        .await
        .unwrap();

    handle.send_pulses(192).await.unwrap();
    wait_for_snapshot(&encoder, CounterSnapshot::new(1, 0)).await;

    for input in ["0", "2", "-1", "", "abc"] {
        let error = encoder.attributes().store(RESET_ATTR, input).unwrap_err();
        assert_eq!(error.errno(), -22, "input {input:?}");
    }
    assert_eq!(
        encoder.attributes().show(DISTANCE_ATTR).unwrap(),
        "204204"
    );

    encoder.remove().await.unwrap();
}

/// Test that non device-tree devices are refused
#[tokio::test]
async fn test_probe_without_device_tree() {
    let (driver, irqs) = driver();
    let (sensor, _handle) = MockHallSensor::new();
    let device = PlatformDevice::new("legacy.0").with_irq(42);

    let error = driver.probe(&device, sensor).await.unwrap_err();
    assert!(matches!(error, HardwareError::NotDeviceTree { .. }));
    assert_eq!(error.errno(), -22);
    assert!(!irqs.is_claimed(42));
}

/// Test that incompatible nodes are refused
#[tokio::test]
async fn test_probe_incompatible_node() {
    let (driver, irqs) = driver();
    let (sensor, _handle) = MockHallSensor::new();
    let device = PlatformDevice::new("other.0")
        .with_of_node("acme,other")
        .with_irq(42);

    let error = driver.probe(&device, sensor).await.unwrap_err();
    assert!(matches!(error, HardwareError::NoMatch { .. }));
    assert!(!irqs.is_claimed(42));
}

/// Test that devices without a usable interrupt line are refused
#[rstest]
#[case::no_irq(None)]
#[case::irq_zero(Some(0))]
#[tokio::test]
async fn test_probe_missing_irq(#[case] irq: Option<u32>) {
    let (driver, _irqs) = driver();
    let (sensor, _handle) = MockHallSensor::new();
    let device = PlatformDevice {
        irq,
        ..PlatformDevice::new("encoder.0").with_of_node(COMPATIBLE)
    };

    let error = driver.probe(&device, sensor).await.unwrap_err();
    assert!(matches!(error, HardwareError::MissingIrq { .. }));
}

/// Test that an interrupt line cannot be bound twice
#[tokio::test]
async fn test_probe_busy_irq() {
    let (driver, irqs) = driver();
    let (first_sensor, _first_handle) = MockHallSensor::new();
    let (second_sensor, _second_handle) = MockHallSensor::new();

    let first = driver
        .probe(&encoder_device("encoder.0", 9), first_sensor)
        .await
        .unwrap();

    let error = driver
        .probe(&encoder_device("encoder.1", 9), second_sensor)
        .await
        .unwrap_err();
    assert!(matches!(error, HardwareError::IrqBusy { irq: 9, .. }));
    assert_eq!(error.errno(), -16);
    assert_eq!(irqs.owner(9), Some("encoder.0".to_string()));

    first.remove().await.unwrap();

    let (sensor, _handle) = MockHallSensor::new();
    let second = driver
        .probe(&encoder_device("encoder.1", 9), sensor)
        .await
        .unwrap();
    assert_eq!(irqs.owner(9), Some("encoder.1".to_string()));
    second.remove().await.unwrap();
}

/// Test that a missing pin group only warns
#[tokio::test]
async fn test_probe_without_pinctrl() {
    let (driver, _irqs) = driver();
    let (sensor, handle) = MockHallSensor::new();
    let device = encoder_device("encoder.0", 4).with_pinctrl(PinctrlState::Unavailable);

    let encoder = driver.probe(&device, sensor).await.unwrap();

    handle.send_pulses(5).await.unwrap();
    wait_for_snapshot(&encoder, CounterSnapshot::new(0, 5)).await;

    encoder.remove().await.unwrap();
}

/// Test that two encoders count independently
#[tokio::test]
async fn test_independent_encoders() {
    let (driver, _irqs) = driver();
    let (left_sensor, left) = MockHallSensor::with_name("left".to_string());
    let (right_sensor, right) = MockHallSensor::with_name("right".to_string());

    let left_encoder = driver
        .probe(&encoder_device("encoder.left", 10), left_sensor)
        .await
        .unwrap();
    let right_encoder = driver
        .probe(&encoder_device("encoder.right", 11), right_sensor)
        .await
        .unwrap();

    left.send_pulses(192).await.unwrap();
    right.send_pulses(1).await.unwrap();

    wait_for_snapshot(&left_encoder, CounterSnapshot::new(1, 0)).await;
    wait_for_snapshot(&right_encoder, CounterSnapshot::new(0, 1)).await;

    left_encoder.attributes().store(RESET_ATTR, "1").unwrap();
    assert_eq!(left_encoder.attributes().show(DISTANCE_ATTR).unwrap(), "0");
    assert_eq!(
        right_encoder.attributes().show(DISTANCE_ATTR).unwrap(),
        "1064"
    );

    left_encoder.remove().await.unwrap();
    right_encoder.remove().await.unwrap();
}

/// Test that a disconnected sensor stops the task but not removal
#[tokio::test]
async fn test_sensor_disconnect() {
    let (driver, irqs) = driver();
    let (sensor, handle) = MockHallSensor::new();

    let encoder = driver
        .probe(&encoder_device("encoder.0", 12), sensor)
        .await
        .unwrap();

    handle.send_pulses(2).await.unwrap();
    drop(handle);

    tokio::time::timeout(Duration::from_secs(5), async {
        while encoder.is_running() {
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("interrupt task did not stop");

    assert_eq!(encoder.snapshot(), CounterSnapshot::new(0, 2));
    assert_eq!(encoder.attributes().show(DISTANCE_ATTR).unwrap(), "2128");

    encoder.remove().await.unwrap();
    assert!(!irqs.is_claimed(12));
}

/// Test concurrent readers while pulses stream in
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_reads_during_pulses() {
    let (driver, _irqs) = driver();
    let (sensor, handle) = MockHallSensor::new();

    let encoder = driver
        .probe(&encoder_device("encoder.0", 20), sensor)
        .await
        .unwrap();
    let final_distance = CounterSnapshot::from_pulse_count(5000).distance();

    let readers: Vec<_> = (0..3)
        .map(|_| {
            let attributes = encoder.attributes().clone();
            tokio::spawn(async move {
                for _ in 0..500 {
                    let shown: u64 = attributes.show(DISTANCE_ATTR).unwrap().parse().unwrap();
                    assert!(shown <= final_distance.as_micrometers());
                    tokio::task::yield_now().await;
                }
            })
        })
        .collect();

    handle.send_pulses(5000).await.unwrap();
    for reader in readers {
        reader.await.unwrap();
    }

    wait_for_snapshot(&encoder, CounterSnapshot::from_pulse_count(5000)).await;
    encoder.remove().await.unwrap();
}
