use std::time::Duration;

use space_shooter::timestep::{FixedTimestep, MAX_CATCH_UP_TICKS};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[test]
fn partial_steps_carry_over() {
    let mut ts = FixedTimestep::new(ms(20));
    assert_eq!(ts.accumulate(ms(10)), 0);
    assert_eq!(ts.until_next(), ms(10));
    assert_eq!(ts.accumulate(ms(10)), 1);
    assert_eq!(ts.until_next(), ms(20));
}

#[test]
fn several_steps_at_once() {
    let mut ts = FixedTimestep::new(ms(20));
    assert_eq!(ts.accumulate(ms(65)), 3);
    assert_eq!(ts.until_next(), ms(15));
}

#[test]
fn long_stall_is_capped_and_forgotten() {
    let mut ts = FixedTimestep::new(ms(20));
    assert_eq!(ts.accumulate(Duration::from_secs(1)), MAX_CATCH_UP_TICKS);
    assert_eq!(ts.accumulate(Duration::ZERO), 0);
    assert_eq!(ts.until_next(), ms(20));
}

#[test]
fn zero_step_is_raised() {
    let ts = FixedTimestep::new(Duration::ZERO);
    assert_eq!(ts.step(), ms(1));
}
