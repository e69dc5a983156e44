// Host-side tests for the RGB and filtered photon beams.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use vision_core::*;

fn rgb_beam(prefill: usize) -> RgbPhotonBeam {
    let params = RgbParams {
        pool_prefill: prefill,
        ..RgbParams::default()
    };
    RgbPhotonBeam::new(Channel::Red, &params)
}

fn assert_inside(geometry: &BeamGeometry, positions: impl IntoIterator<Item = glam::Vec2>) {
    for p in positions {
        assert!(p.x > 0.0, "photon at x={} left the beam", p.x);
        assert!(
            p.y > 0.0 && p.y < geometry.height,
            "photon at y={} left the beam",
            p.y
        );
    }
}

#[test]
fn rgb_photons_stay_in_bounds_for_any_dt() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut beam = rgb_beam(0);
    let mut timer = EventTimer::new(RGB_EMISSION_RATE).unwrap();
    for i in 0..2_000 {
        let dt = if i % 50 == 0 { 0.0 } else { rng.gen_range(0.0..=MAX_DT) };
        let level = if i % 300 < 200 { 255.0 } else { 0.0 };
        beam.update(dt, level);
        timer.step(dt, |since| beam.create_photon(since, level, &mut rng));
        assert_inside(beam.geometry(), beam.photons().map(|p| p.motion.position));
    }
}

#[test]
fn rgb_dark_source_emits_one_sentinel_per_tick() {
    let mut beam = rgb_beam(0);
    beam.update(1.0 / 60.0, 0.0);
    assert_eq!(beam.photon_count(), 1);
    let black = *beam.photons().next().unwrap();
    assert!(black.is_sentinel());
    assert_eq!(black.motion.position.x, beam.geometry().length);
    assert_eq!(black.motion.position.y, beam.geometry().center_y());
    assert_eq!(black.motion.velocity.y, 0.0);
    assert_eq!(beam.renderable_photons().count(), 0);
}

#[test]
fn rgb_perceived_intensity_follows_arrivals_then_decays() {
    let mut rng = StdRng::seed_from_u64(11);
    let mut beam = rgb_beam(0);
    let mut timer = EventTimer::new(RGB_EMISSION_RATE).unwrap();
    let dt = 1.0 / 60.0;
    let mut perceived = 0.0;

    let mut run = |beam: &mut RgbPhotonBeam, level: f32, frames: usize, perceived: &mut f32| {
        for _ in 0..frames {
            if let Some(v) = beam.update(dt, level) {
                *perceived = v;
            }
            timer.step(dt, |since| beam.create_photon(since, level, &mut rng));
        }
    };

    run(&mut beam, 200.0, 120, &mut perceived);
    assert_eq!(perceived, 200.0);
    run(&mut beam, 0.0, 120, &mut perceived);
    assert_eq!(perceived, 0.0);
}

#[test]
fn rgb_created_photon_is_back_dated_along_its_path() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut beam = rgb_beam(0);
    beam.create_photon(0.1, 180.0, &mut rng);
    let p = *beam.photons().next().unwrap();
    let g = *beam.geometry();
    assert!((p.motion.position.x - (g.length + g.x_velocity * 0.1)).abs() < 1e-3);
    let vy = p.motion.velocity.y;
    assert!(vy.abs() <= g.fan_factor / 2.0 * FAN_SPEED_SCALE);
    let expected_y = g.center_y() + vy * FAN_ORIGIN_LEAD + vy * 0.1;
    assert!((p.motion.position.y - expected_y).abs() < 1e-3);
    assert_eq!(p.intensity, 180.0);
}

#[test]
fn rgb_dark_source_creates_nothing() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut beam = rgb_beam(0);
    beam.create_photon(0.0, 0.0, &mut rng);
    assert_eq!(beam.photon_count(), 0);
}

#[test]
fn rgb_reset_returns_photons_to_pool() {
    let mut rng = StdRng::seed_from_u64(9);
    let mut beam = rgb_beam(0);
    for _ in 0..10 {
        beam.create_photon(0.0, 255.0, &mut rng);
    }
    assert_eq!(beam.pool().fresh_allocations(), 10);
    assert_eq!(beam.pool().len(), 0);

    beam.reset();
    assert_eq!(beam.photon_count(), 0);
    assert_eq!(beam.pool().len(), 10);

    for _ in 0..10 {
        beam.create_photon(0.0, 255.0, &mut rng);
    }
    assert_eq!(beam.pool().fresh_allocations(), 10, "pooled records were not reused");
    assert_eq!(beam.pool().len(), 0);
}

#[test]
fn rgb_prefilled_pool_avoids_allocation() {
    let mut rng = StdRng::seed_from_u64(9);
    let mut beam = rgb_beam(RGB_POOL_PREFILL);
    assert_eq!(beam.pool().len(), RGB_POOL_PREFILL);
    for _ in 0..RGB_POOL_PREFILL {
        beam.create_photon(0.0, 255.0, &mut rng);
    }
    assert_eq!(beam.pool().fresh_allocations(), 0);
}

fn filtered_settings() -> SingleBulbSettings {
    SingleBulbSettings {
        source_on: true,
        source_wavelength: 565.0,
        ..SingleBulbSettings::default()
    }
}

#[test]
fn filtered_photons_stay_in_bounds_for_any_dt() {
    let mut rng = StdRng::seed_from_u64(21);
    let params = SingleBulbParams::default();
    let mut beam = FilteredPhotonBeam::new(&params);
    let mut settings = filtered_settings();
    let mut perceived = Color::WHITE;
    for i in 0..2_000 {
        settings.light = if i % 400 < 200 {
            LightType::Colored
        } else {
            LightType::White
        };
        settings.filter_enabled = i % 250 > 100;
        settings.filter_wavelength = 480.0 + (i % 7) as f32 * 20.0;
        let dt = rng.gen_range(0.0..=MAX_DT);
        if let Some(c) = beam.update(dt, &settings, perceived, &mut rng) {
            perceived = c;
        }
        assert_inside(
            &params.geometry,
            beam.photons().map(|p| p.motion.position),
        );
    }
}

#[test]
fn filtered_beam_creates_nothing_for_zero_dt() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut beam = FilteredPhotonBeam::new(&SingleBulbParams::default());
    let arrived = beam.update(0.0, &filtered_settings(), Color::BLACK, &mut rng);
    assert!(arrived.is_none());
    assert_eq!(beam.photon_count(), 0);
}

#[test]
fn unfiltered_white_light_arrives_white() {
    let mut rng = StdRng::seed_from_u64(2);
    let mut beam = FilteredPhotonBeam::new(&SingleBulbParams::default());
    let settings = SingleBulbSettings {
        light: LightType::White,
        ..filtered_settings()
    };
    let mut arrivals = Vec::new();
    for _ in 0..180 {
        arrivals.extend(beam.update(1.0 / 60.0, &settings, Color::WHITE, &mut rng));
    }
    assert!(!arrivals.is_empty());
    assert!(arrivals.iter().all(|c| *c == Color::WHITE));
}

#[test]
fn partially_transmitted_light_arrives_dimmed() {
    let mut rng = StdRng::seed_from_u64(4);
    let mut beam = FilteredPhotonBeam::new(&SingleBulbParams::default());
    let settings = SingleBulbSettings {
        source_wavelength: 560.0,
        filter_enabled: true,
        filter_wavelength: 550.0,
        ..filtered_settings()
    };
    let expected = wavelength_to_color(560.0).with_alpha(transmission_probability(
        560.0,
        550.0,
        GAUSSIAN_WIDTH / 2.0,
    ));
    let mut arrivals = Vec::new();
    for _ in 0..180 {
        arrivals.extend(beam.update(1.0 / 60.0, &settings, expected, &mut rng));
    }
    assert!(!arrivals.is_empty());
    assert!(arrivals.iter().all(|c| *c == expected), "{arrivals:?}");
}

#[test]
fn fully_blocked_light_never_reaches_the_eye() {
    let mut rng = StdRng::seed_from_u64(8);
    let params = SingleBulbParams {
        filter: FilterParams {
            half_width: 10.0,
            ..FilterParams::default()
        },
        ..SingleBulbParams::default()
    };
    let mut beam = FilteredPhotonBeam::new(&params);
    let settings = SingleBulbSettings {
        filter_enabled: true,
        filter_wavelength: 550.0,
        ..filtered_settings()
    };
    let mut arrivals = Vec::new();
    for _ in 0..300 {
        arrivals.extend(beam.update(1.0 / 60.0, &settings, Color::BLACK, &mut rng));
        for p in beam.photons() {
            let lowest = params.filter.offset + params.geometry.x_velocity / 60.0 - 1e-3;
            assert!(p.motion.position.x >= lowest, "photon got past the filter");
        }
    }
    assert!(arrivals.is_empty(), "{arrivals:?}");
    // the eye already sees black, so no sentinel is needed
    assert!(beam.photons().all(|p| !p.is_sentinel()));
}

#[test]
fn blocked_filter_sends_black_to_an_eye_that_still_sees_light() {
    let mut rng = StdRng::seed_from_u64(8);
    let mut beam = FilteredPhotonBeam::new(&SingleBulbParams::default());
    let settings = SingleBulbSettings {
        source_wavelength: 650.0,
        filter_enabled: true,
        filter_wavelength: 450.0,
        ..filtered_settings()
    };
    let still_lit = wavelength_to_color(650.0);
    let mut saw_sentinel = false;
    for _ in 0..120 {
        beam.update(1.0 / 60.0, &settings, still_lit, &mut rng);
        for p in beam.photons().filter(|p| p.is_sentinel()) {
            saw_sentinel = true;
            assert!(p.passed_filter);
            assert!(p.motion.position.x <= beam.params().filter.offset);
        }
    }
    assert!(saw_sentinel);

    let mut arrivals = Vec::new();
    for _ in 0..120 {
        arrivals.extend(beam.update(1.0 / 60.0, &settings, still_lit, &mut rng));
    }
    assert!(!arrivals.is_empty());
    assert!(arrivals.iter().all(Color::is_black));
}

#[test]
fn reset_parks_photons_and_next_tick_sweeps_them() {
    let mut rng = StdRng::seed_from_u64(13);
    let mut beam = FilteredPhotonBeam::new(&SingleBulbParams::default());
    let mut settings = filtered_settings();
    for _ in 0..20 {
        beam.update(1.0 / 60.0, &settings, Color::BLACK, &mut rng);
    }
    let live = beam.photon_count();
    assert!(live > 0);
    let pooled_before = beam.pool().len();

    beam.reset();
    assert_eq!(beam.photon_count(), live);
    assert_eq!(beam.renderable_photons().count(), 0);

    settings.source_on = false;
    let arrived = beam.update(1.0 / 60.0, &settings, Color::BLACK, &mut rng);
    assert!(arrived.is_none(), "swept photons must not reach the eye");
    assert_eq!(beam.photon_count(), 0);
    assert_eq!(
        beam.pool().len(),
        (pooled_before + live).min(beam.pool().capacity())
    );
}

#[test]
fn pool_reuses_slots_and_trims_idle_ones() {
    let mut pool: Pool<RgbPhoton> = Pool::new(3);
    let taken: Vec<_> = (0..5).map(|_| pool.acquire(|p| p.intensity = 1.0)).collect();
    assert_eq!(taken, vec![0, 1, 2, 3, 4]);
    assert_eq!(pool.fresh_allocations(), 5);
    assert_eq!(pool.allocated(), 5);

    pool.release_all(taken);
    assert_eq!(pool.len(), 3);
    assert_eq!(pool.allocated(), 3);

    let again = pool.acquire(|p| p.intensity = 7.0);
    assert!(again < 3, "acquire grew the arena instead of reusing slot {again}");
    assert_eq!(pool.get(again).intensity, 7.0);
    assert_eq!(pool.len(), 2);
    assert_eq!(pool.fresh_allocations(), 5);
}

#[test]
fn pool_keeps_idle_slots_between_live_ones() {
    let mut pool: Pool<RgbPhoton> = Pool::new(0);
    let a = pool.acquire(|_| {});
    let b = pool.acquire(|_| {});
    pool.release(a);
    // slot `a` cannot be dropped while `b` sits behind it
    assert_eq!(pool.allocated(), 2);
    let c = pool.acquire(|p| p.intensity = 3.0);
    assert_eq!(c, a);
    assert_eq!(pool.fresh_allocations(), 2);

    pool.release(b);
    pool.release(c);
    assert_eq!(pool.allocated(), 0);
    assert!(pool.is_empty());
}

#[test]
fn steady_beam_stops_growing_its_arena() {
    let mut rng = StdRng::seed_from_u64(17);
    let mut beam = rgb_beam(0);
    let mut timer = EventTimer::new(RGB_EMISSION_RATE).unwrap();
    let dt = 1.0 / 60.0;
    for _ in 0..120 {
        beam.update(dt, 255.0);
        timer.step(dt, |since| beam.create_photon(since, 255.0, &mut rng));
    }
    let grown = beam.pool().fresh_allocations();
    for _ in 0..600 {
        beam.update(dt, 255.0);
        timer.step(dt, |since| beam.create_photon(since, 255.0, &mut rng));
    }
    // retired slots feed new photons once the beam is full
    assert!(beam.pool().fresh_allocations() <= grown + 2);
    assert!(beam.pool().allocated() <= beam.photon_count() + beam.pool().capacity());
}

fn photons_created_in(seconds: f32, hz: usize, seed: u64) -> usize {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut beam = FilteredPhotonBeam::new(&SingleBulbParams::default());
    let settings = filtered_settings();
    let dt = 1.0 / hz as f32;
    for _ in 0..(seconds * hz as f32).round() as usize {
        beam.update(dt, &settings, Color::BLACK, &mut rng);
    }
    beam.photon_count()
}

#[test]
fn creation_rate_does_not_depend_on_frame_rate() {
    // half a second is shorter than a beam crossing, so nothing retires
    let expected = PHOTON_CREATION_RATE * 0.5;
    for hz in [30, 60, 144, 1_000, 10_000] {
        let created = photons_created_in(0.5, hz, 23) as f32;
        assert!(
            (created - expected).abs() < 40.0,
            "{hz} Hz created {created}, expected about {expected}"
        );
    }
}

#[test]
fn creation_count_matches_expectation() {
    let mut rng = StdRng::seed_from_u64(29);
    let trials = 100_000;
    let total: usize = (0..trials)
        .map(|_| creation_count(0.3125, MAX_PHOTONS_PER_TICK, &mut rng))
        .sum();
    let mean = total as f32 / trials as f32;
    assert!((mean - 0.3125).abs() < 0.01, "mean {mean}");

    assert_eq!(creation_count(5.0, 40, &mut rng), 5);
    assert_eq!(creation_count(1_000.0, 40, &mut rng), 40);
    assert_eq!(creation_count(0.0, 40, &mut rng), 0);
    assert_eq!(creation_count(f32::NAN, 40, &mut rng), 0);
}

#[test]
fn eye_showing_a_fully_filtered_beam_needs_no_sentinel() {
    let mut rng = StdRng::seed_from_u64(31);
    let mut beam = FilteredPhotonBeam::new(&SingleBulbParams::default());
    let settings = SingleBulbSettings {
        source_wavelength: 650.0,
        filter_enabled: true,
        filter_wavelength: 450.0,
        ..filtered_settings()
    };
    // what beam mode reports for a filter that passes nothing
    let invisible = wavelength_to_color(650.0).with_alpha(0.0);
    for _ in 0..180 {
        beam.update(1.0 / 60.0, &settings, invisible, &mut rng);
        assert!(beam.photons().all(|p| !p.is_sentinel()));
    }
}
