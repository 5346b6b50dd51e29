//! Verso - Page-Turning Actuator Firmware
//!
//! Main firmware binary for RP2040-based flipper boards. Wires the motor,
//! servo, sensor, and buzzer drivers to the actuation controller, and the
//! UART link to the command/notify tasks.
//!
//! "Verso" is the left-hand page of an open book - the page the
//! mechanism exposes with every flip.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::UART0;
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use verso_drivers::alert::Buzzer;
use verso_drivers::motor::HBridgeMotor;
use verso_drivers::sensor::ProximitySwitch;
use verso_drivers::servo::{PwmServo, ServoTrio};

mod channels;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// PWM clock divider bringing the 125 MHz system clock to 1 MHz
const PWM_DIV_1MHZ: u8 = 125;
/// 20 ms servo frame at 1 MHz (one duty count per microsecond)
const SERVO_PWM_TOP: u16 = 19_999;
/// ~1 kHz motor PWM at 1 MHz
const MOTOR_PWM_TOP: u16 = 999;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Verso firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Remote link / console UART
    let uart_config = UartConfig::default(); // 115200 baud default
    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);
    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();
    info!("UART initialized for remote link");

    // Feed motor: H-bridge direction lines plus PWM enable
    let in1 = Output::new(p.PIN_2, Level::Low);
    let in2 = Output::new(p.PIN_3, Level::Low);
    let mut motor_cfg = PwmConfig::default();
    motor_cfg.divider = PWM_DIV_1MHZ.into();
    motor_cfg.top = MOTOR_PWM_TOP;
    let (motor_en, _) = Pwm::new_output_a(p.PWM_SLICE2, p.PIN_4, motor_cfg).split();
    let motor = HBridgeMotor::new(in1, in2, motor_en.unwrap());

    // Servo channels: 50 Hz frame
    let mut servo_cfg = PwmConfig::default();
    servo_cfg.divider = PWM_DIV_1MHZ.into();
    servo_cfg.top = SERVO_PWM_TOP;
    let (wheel_pwm, _) = Pwm::new_output_a(p.PWM_SLICE3, p.PIN_6, servo_cfg.clone()).split();
    let (swipe_pwm, _) = Pwm::new_output_a(p.PWM_SLICE4, p.PIN_8, servo_cfg.clone()).split();
    let (pressure_pwm, _) = Pwm::new_output_a(p.PWM_SLICE5, p.PIN_10, servo_cfg).split();
    let servos = ServoTrio::new(
        PwmServo::new(wheel_pwm.unwrap()),
        PwmServo::new(swipe_pwm.unwrap()),
        PwmServo::new(pressure_pwm.unwrap()),
    );

    // Proximity sensor: open-collector output, pulled up, low on contact
    let sensor = ProximitySwitch::new(Input::new(p.PIN_12, Pull::Up));

    // Buzzer
    let alert = Buzzer::new(Output::new(p.PIN_13, Level::Low));

    // Chassis buttons (active-low momentary)
    let start_button = Input::new(p.PIN_14, Pull::Up);
    let stop_button = Input::new(p.PIN_15, Pull::Up);

    info!("Actuator hardware initialized");

    // Spawn tasks
    spawner.spawn(tasks::remote_rx_task(rx)).unwrap();
    spawner.spawn(tasks::remote_tx_task(tx)).unwrap();
    spawner
        .spawn(tasks::button_task(start_button, stop_button))
        .unwrap();
    spawner
        .spawn(tasks::actuation_task(motor, servos, sensor, alert))
        .unwrap();

    info!("All tasks spawned, firmware running");

    // Main task has nothing else to do - all work happens in spawned tasks
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
