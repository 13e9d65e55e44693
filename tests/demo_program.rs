//! End-to-end run of the shipped combination-lock demo.

use n15a::{Bit, Machine};

const DEMO: &str = include_str!("../demos/combination-lock.n15a");

fn boot(machine: &mut Machine) {
    let diagnostics = machine.power_on(DEMO);
    assert!(diagnostics.is_empty(), "demo should load cleanly: {:?}", diagnostics);
}

#[test]
fn correct_combination_lights_both_lamps() {
    let mut machine = Machine::new();
    machine.set_input(0, true);
    machine.set_input(2, true);
    machine.set_input(3, true);
    boot(&mut machine);

    // Boot bank (7 cycles), two check banks (5 each), two stores
    for tick in 0..19 {
        machine.step(tick).unwrap();
    }

    let snap = machine.snapshot();
    assert_eq!(snap.outputs, [Bit::I, Bit::I]);
    assert_eq!(snap.bank, 3);

    // The blink sequence then drops OUT0 again
    machine.step(19).unwrap();
    machine.step(20).unwrap();
    assert_eq!(machine.snapshot().outputs, [Bit::O, Bit::I]);
}

#[test]
fn wrong_combination_keeps_lamps_dark() {
    let mut machine = Machine::new();
    machine.set_input(1, true); // IN_1 must be low
    boot(&mut machine);

    for tick in 0..200 {
        machine.step(tick).unwrap();
        let snap = machine.snapshot();
        assert_eq!(snap.outputs, [Bit::O, Bit::O]);
    }
}

#[test]
fn idle_machine_cycles_between_guard_banks() {
    let mut machine = Machine::new();
    boot(&mut machine);

    for tick in 0..200 {
        machine.step(tick).unwrap();
        let snap = machine.snapshot();
        assert!(snap.bank <= 1, "idle run must stay in banks 0-1");
    }
}

#[test]
fn export_contains_boot_sentinel_and_every_tick() {
    let mut machine = Machine::new();
    boot(&mut machine);

    for tick in 0..25 {
        machine.step(tick).unwrap();
    }

    let export = machine.export_trace();
    let lines: Vec<&str> = export.lines().collect();
    assert_eq!(lines.len(), 26);
    assert_eq!(lines[0], "--- SYSTEM READY (POWER OFF) ---");
    assert!(lines[1].starts_with("[Tick 00000] B0 L0: "));
    assert!(lines[25].starts_with("[Tick 00024] "));
}
