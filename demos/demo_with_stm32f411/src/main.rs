#![no_std]
#![no_main]

use core::fmt::Write;

use panic_rtt_target as _;
use rtt_target::{rprintln, rtt_init_print};
use stm32f4xx_hal::{pac, prelude::*};

use lcd1602_bitbang::{
    bus::{SoftI2c, Timing},
    lcd::{Config, Lcd},
    line::OpenDrainPins,
    sender::I2cSender,
};

// PCF8574T with A0~A2 left open
const LCD_ADDR: u8 = 0x27;

#[cortex_m_rt::entry]
fn main() -> ! {
    rtt_init_print!();

    let dp = pac::Peripherals::take().expect("Cannot take device peripherals");
    let cp = pac::CorePeripherals::take().expect("Cannot take core peripherals");

    let rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.use_hse(12.MHz()).freeze();

    // bus waits are short, give them a microsecond timer; LCD waits go to SysTick
    let bus_delayer = dp.TIM5.delay_us(&clocks);
    let mut delayer = cp.SYST.delay(&clocks);

    // PB6 as CLOCK, PB7 as DATA, external pull-up on the adapter board
    let gpiob = dp.GPIOB.split();
    let pins = OpenDrainPins::new(
        gpiob.pb6.into_open_drain_output(),
        gpiob.pb7.into_open_drain_output(),
    );

    let mut i2c = SoftI2c::new(pins, bus_delayer, LCD_ADDR, Timing::default())
        .expect("LCD address is not 7 bit");
    let mut sender = I2cSender::new(&mut i2c);

    let mut lcd = match Lcd::new(&mut sender, &mut delayer, Config::default()) {
        Ok(lcd) => lcd,
        Err(err) => {
            rprintln!("LCD init failed: {:?}", err);
            #[allow(clippy::empty_loop)]
            loop {}
        }
    };

    let mut counter: u32 = 0;

    loop {
        if let Err(err) = lcd.clean_display() {
            rprintln!("clear failed: {:?}", err);
        }

        // 4 digits, wraps after 9999
        if write!(lcd, "{:04}", counter % 10_000).is_err() {
            rprintln!("write counter {} failed", counter);
        }

        lcd.delay_ms(1_000);
        counter = counter.wrapping_add(1);
    }
}
