#![deny(unsafe_code)]
#![deny(warnings)]
#![no_main]
#![no_std]

extern crate panic_semihosting;

mod config;

use cortex_m::singleton;
use cortex_m_semihosting::hprintln;
use defmt_rtt as _;

use power_functions::{Command, PowerFunctions, Pwm};

use stm32f1xx_hal::{
    prelude::*,
    adc::{ self, Adc, AdcDma, Scan, SetChannels },
    delay::Delay,
    pac,
    gpio::{
        Analog, Output, PushPull, State,
        gpioa::{ PA0, PA1 },
        gpiob::{
            PB9, // IR LED
            PB12, // LED
        },
    },
    timer::{ Timer, CountDownTimer, Event },
};

use config::*;

type IrLed = PB9<Output<PushPull>>;

type Remote = PowerFunctions<IrLed, Delay, SYSCLK_HZ>;

pub struct Counter {
    commands: u32,
}

// Red motor on the X axis, blue motor on the Y axis.
#[allow(dead_code)]
pub struct JoystickAdcPins(PA0<Analog>, PA1<Analog>);

impl SetChannels<JoystickAdcPins> for Adc<pac::ADC1> {
    fn set_samples(&mut self) {
        self.set_channel_sample_time(0, adc::SampleTime::T_28);
        self.set_channel_sample_time(1, adc::SampleTime::T_28);
    }

    fn set_sequence(&mut self) {
        self.set_regular_sequence(&[0, 1]);
    }
}

fn axis_to_pwm(raw: u16) -> Pwm {
    let offset = raw as i32 - ADC_CENTRE;
    if offset.abs() < DEAD_ZONE {
        return Pwm::Float;
    }
    Pwm::from_speed((offset * 8 / ADC_CENTRE).max(-7).min(7) as i8)
}

#[rtic::app(device = stm32f1xx_hal::pac, peripherals = true)]
const APP: () = {
    struct Resources {
        remote: Remote,
        counter: Counter,
        joystick_scan: Option<(AdcDma<JoystickAdcPins, Scan>, &'static mut [u16; 2])>,
        timer: CountDownTimer<pac::TIM1>,
        led: PB12<Output<PushPull>>,
    }

    #[init]
    fn init(cx: init::Context) -> init::LateResources {
        // Take ownership over the raw flash and rcc devices and convert them into the corresponding
        // HAL structs
        let mut flash = cx.device.FLASH.constrain();
        let mut rcc = cx.device.RCC.constrain();

        // The IR carrier is timed from the core clock, so it has to match SYSCLK_HZ
        let clocks = rcc.cfgr
            .use_hse(HSE_HZ.hz())
            .sysclk(SYSCLK_HZ.hz())
            .pclk1(36.mhz())
            .adcclk(12.mhz())
            .freeze(&mut flash.acr);

        let mut gpioa = cx.device.GPIOA.split(&mut rcc.apb2);
        let mut gpiob = cx.device.GPIOB.split(&mut rcc.apb2);
        let led = gpiob.pb12.into_push_pull_output_with_state(&mut gpiob.crh, State::Low);
        let ir_led = gpiob.pb9.into_push_pull_output_with_state(&mut gpiob.crh, State::Low);

        let delay = Delay::new(cx.core.SYST, clocks);
        let remote = Remote::new(ir_led, delay, IR_CHANNEL);

	    let joystick_adc = adc::Adc::adc1(cx.device.ADC1, &mut rcc.apb2, clocks);
    	let joystick_channels = JoystickAdcPins(
        	gpioa.pa0.into_analog(&mut gpioa.crl),
        	gpioa.pa1.into_analog(&mut gpioa.crl),
    	);

	    let dma_ch1 = cx.device.DMA1.split(&mut rcc.ahb).1;
		let joystick_scan = joystick_adc.with_scan_dma(joystick_channels, dma_ch1);

        let mut timer = Timer::tim1(cx.device.TIM1, &clocks, &mut rcc.apb2).start_count_down(UPDATE_HZ.hz());
        timer.listen(Event::Update);

        hprintln!("power functions: channel {}, sysclk {}Hz", IR_CHANNEL + 1, clocks.sysclk().0).ok();

        init::LateResources {
            remote,
            counter: Counter { commands: 0 },
            joystick_scan: Some((joystick_scan, singleton!(: [u16; 2] = [0; 2]).unwrap())),
            timer,
            led,
        }
    }

    #[task(binds = TIM1_UP, priority = 1,
        resources = [ joystick_scan, timer ],
        spawn = [ transmit ])]
    fn update(c: update::Context) {
        if let Some((joystick_scan, dma_buffer)) = c.resources.joystick_scan.take() {
            let (dma_buffer, joystick_scan) = joystick_scan.read(dma_buffer).wait();
            let command = Command::ComboPwm {
                blue: axis_to_pwm(dma_buffer[1]).into(),
                red: axis_to_pwm(dma_buffer[0]).into(),
            };
            // Same priority as transmit, so the queue is always empty here.
            c.spawn.transmit(command).ok();
            *c.resources.joystick_scan = Some((joystick_scan, dma_buffer));
        }
        c.resources.timer.clear_update_interrupt_flag();
    }

    #[task(resources = [ remote, counter, led ])]
    fn transmit(c: transmit::Context, command: Command) {
        c.resources.remote.execute(command);
        c.resources.led.toggle().ok();

        let counter = c.resources.counter;
        counter.commands += 1;
        if counter.commands % STATUS_EVERY == 0 {
            hprintln!("sent: {} last: {:?}", counter.commands, command).ok();
        }
    }

    extern "C" {
        fn USART2();
    }
};
