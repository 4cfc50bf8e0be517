use mandelmagic::xorshift::XorShift64;
use mandelmagic::{
    render, Color, Framebuffer, Mixing, RenderOptions, RenderParams, Renderer, SampleSpec,
    Viewport,
};

#[test]
fn default_view_fills_every_pixel() {
    let mut fb = Framebuffer::new(512, 512);
    render(&mut fb, 512, 512, -0.745, 0.113, 0.005, 1000, 10);
    assert_eq!(fb.len(), 262_144);
    assert!(fb.is_complete());
    assert!(fb.pixels().iter().all(|c| c.a == 255));
}

#[test]
fn query_driven_render_matches_its_dimensions() {
    let params = RenderParams::from_query("w=64&h=32&px=-2&py=-1&ph=2&iter=0&samples=-4").sanitized();
    let renderer = Renderer::new(params.viewport(), params.sample_spec(), RenderOptions::default());
    assert_eq!(renderer.spec().max_iterations, 1000);
    assert_eq!(renderer.spec().samples, 10);

    let mut fb = Framebuffer::new(64, 32);
    renderer.render(&mut fb);
    assert_eq!((fb.width(), fb.height()), (64, 32));
    assert!(fb.is_complete());
}

#[test]
fn gamma_mixing_is_darker_on_mixed_pixels() {
    // The full set at 1 pixel: a blend of white interior and colored
    // exterior, where the two policies must disagree.
    let viewport = Viewport::new(1, 1, -2.0, -1.5, 3.0);
    let spec = SampleSpec::new(100, 400);
    let brightness = |mixing| {
        let r = Renderer::new(
            viewport,
            spec,
            RenderOptions {
                threads: 1,
                seed: 5,
                mixing,
            },
        );
        let c = r.render_pixel(0, 0, &mut XorShift64::new(99));
        u32::from(c.r) + u32::from(c.g) + u32::from(c.b)
    };
    assert!(brightness(Mixing::Linear) > brightness(Mixing::Gamma));
}

fn variance(values: &[f64]) -> f64 {
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / values.len() as f64
}

fn pixel_variance(samples: u32, trials: u64) -> f64 {
    let r = Renderer::new(
        Viewport::new(1, 1, -2.0, -1.5, 3.0),
        SampleSpec::new(100, samples),
        RenderOptions {
            threads: 1,
            seed: 0,
            mixing: Mixing::Linear,
        },
    );
    let values: Vec<f64> = (0..trials)
        .map(|t| {
            let mut rng = XorShift64::for_worker(0xC0FFEE, t as usize);
            let c: Color = r.render_pixel(0, 0, &mut rng);
            f64::from(c.r) + f64::from(c.g) + f64::from(c.b)
        })
        .collect();
    variance(&values)
}

#[test]
fn more_samples_means_less_noise() {
    let coarse = pixel_variance(1, 400);
    let fine = pixel_variance(16, 400);
    assert!(coarse > 0.0);
    assert!(fine < coarse, "16 samples: {}, 1 sample: {}", fine, coarse);
}

#[test]
fn preset_renders_complete() {
    let mut params = mandelmagic::presets::find("classic").unwrap().params;
    params.width = 48;
    params.height = 48;
    params.max_iterations = 64;
    params.samples = 2;
    let renderer = Renderer::new(params.viewport(), params.sample_spec(), RenderOptions::default());
    let mut fb = Framebuffer::new(48, 48);
    renderer.render(&mut fb);
    assert!(fb.is_complete());
    // The classic view contains both the set and its outside.
    assert!(fb.pixels().iter().any(|c| *c == Color::WHITE));
    assert!(fb.pixels().iter().any(|c| *c != Color::WHITE));
}
