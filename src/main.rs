//! Pulley Calc entry point
//!
//! In the browser this binds the calculator page's form controls and SVG
//! diagram. Natively it evaluates one configuration from the command line.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::DVec2;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, EventTarget, HtmlInputElement, HtmlSelectElement};

    use pulley_calc::diagram::{Diagram, Segment};
    use pulley_calc::interaction::{Calculator, ClientRect, DragTarget, parse_number};
    use pulley_calc::{AngleUnit, ContactMode, ResultText, WrapDirection};

    const SVG_ID: &str = "visualization";

    /// Page instance holding all state
    struct App {
        calc: Calculator,
        document: Document,
    }

    impl App {
        fn new(document: Document) -> Self {
            Self {
                calc: Calculator::default(),
                document,
            }
        }

        fn element(&self, id: &str) -> Option<Element> {
            let el = self.document.get_element_by_id(id);
            if el.is_none() {
                log::warn!("Missing element #{}", id);
            }
            el
        }

        fn input(&self, id: &str) -> Option<HtmlInputElement> {
            self.element(id)?.dyn_into().ok()
        }

        fn select_value(&self, id: &str) -> Option<String> {
            let select: HtmlSelectElement = self.element(id)?.dyn_into().ok()?;
            Some(select.value())
        }

        fn set_attr(&self, id: &str, name: &str, value: f64) {
            if let Some(el) = self.element(id) {
                let _ = el.set_attribute(name, &value.to_string());
            }
        }

        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.element(id) {
                el.set_text_content(Some(text));
            }
        }

        fn set_line(&self, id: &str, segment: &Segment) {
            self.set_attr(id, "x1", segment.from.x);
            self.set_attr(id, "y1", segment.from.y);
            self.set_attr(id, "x2", segment.to.x);
            self.set_attr(id, "y2", segment.to.y);
        }

        fn client_rect(&self) -> Option<ClientRect> {
            let rect = self.element(SVG_ID)?.get_bounding_client_rect();
            Some(ClientRect {
                left: rect.left(),
                top: rect.top(),
                width: rect.width(),
                height: rect.height(),
            })
        }

        /// Push the current angle of `target` into its text field and slider
        fn sync_angle_controls(&self, target: DragTarget) {
            let (field, _) = angle_ids(target);
            if let Some(input) = self.input(field) {
                input.set_value(&self.calc.angle_text(target));
            }
            self.sync_angle_slider(target);
        }

        fn sync_angle_slider(&self, target: DragTarget) {
            let (_, slider) = angle_ids(target);
            if let Some(input) = self.input(slider) {
                input.set_value(&self.calc.slider_degrees(target).to_string());
            }
        }

        /// Redraw the diagram and result text from the current result
        fn redraw(&self) {
            let diagram = Diagram::layout(
                self.calc.config(),
                self.calc.result(),
                self.calc.settings(),
            );

            self.set_attr("contact-point1", "cx", diagram.contact1.x);
            self.set_attr("contact-point1", "cy", diagram.contact1.y);
            self.set_attr("contact-point2", "cx", diagram.contact2.x);
            self.set_attr("contact-point2", "cy", diagram.contact2.y);

            self.set_line("rope-segment1", &diagram.rope1);
            self.set_line("rope-segment2", &diagram.rope2);
            if let Some(el) = self.element("rope-arc") {
                let _ = el.set_attribute("d", &diagram.arc.path_data());
            }

            self.set_line("force1-vector", &diagram.force1);
            self.set_line("force2-vector", &diagram.force2);
            self.set_line("axle-force-vector", &diagram.axle_force);

            for (id, label) in [
                ("slope1-label", &diagram.slope1_label),
                ("slope2-label", &diagram.slope2_label),
                ("contact-angle-label", &diagram.angle_label),
            ] {
                self.set_attr(id, "x", label.pos.x);
                self.set_attr(id, "y", label.pos.y);
                self.set_text(id, &label.text);
            }

            let text = ResultText::from_result(self.calc.result());
            self.set_text("slope1-result", &text.slope1);
            self.set_text("slope2-result", &text.slope2);
            self.set_text("force1-result", &text.force1);
            self.set_text("force2-result", &text.force2);
            self.set_text("axle-force-result", &text.axle_force);
            self.set_text("axle-magnitude-result", &text.axle_magnitude);
            self.set_text("axle-angle-result", &text.axle_angle);
            self.set_text("contact-angle-rad-result", &text.contact_angle_rad);
            self.set_text("contact-angle-deg-result", &text.contact_angle_deg);
        }

        fn set_dragging_style(&self, dragging: bool) {
            if let Some(svg) = self.element(SVG_ID) {
                let classes = svg.class_list();
                let _ = if dragging {
                    classes.add_1("dragging")
                } else {
                    classes.remove_1("dragging")
                };
            }
            if let Some(body) = self.document.body() {
                let _ = body
                    .style()
                    .set_property("user-select", if dragging { "none" } else { "" });
            }
        }
    }

    /// (text field id, slider id) for an angle
    fn angle_ids(target: DragTarget) -> (&'static str, &'static str) {
        match target {
            DragTarget::Point1 => ("theta1", "theta1-slider"),
            DragTarget::Point2 => ("theta2", "theta2-slider"),
        }
    }

    fn unit_id(target: DragTarget) -> &'static str {
        match target {
            DragTarget::Point1 => "theta1-units",
            DragTarget::Point2 => "theta2-units",
        }
    }

    fn point_id(target: DragTarget) -> &'static str {
        match target {
            DragTarget::Point1 => "contact-point1",
            DragTarget::Point2 => "contact-point2",
        }
    }

    fn listen(target: &EventTarget, event: &str, handler: impl FnMut(web_sys::Event) + 'static) {
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
        if target
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .is_err()
        {
            log::warn!("Failed to bind {} listener", event);
        }
        closure.forget();
    }

    /// Client position of a mouse or first touch point
    fn pointer_position(event: &web_sys::Event) -> Option<DVec2> {
        if let Some(mouse) = event.dyn_ref::<web_sys::MouseEvent>() {
            return Some(DVec2::new(mouse.client_x() as f64, mouse.client_y() as f64));
        }
        let touch = event.dyn_ref::<web_sys::TouchEvent>()?.touches().get(0)?;
        Some(DVec2::new(touch.client_x() as f64, touch.client_y() as f64))
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Pulley calculator starting...");

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document available");
            return;
        };

        let app = Rc::new(RefCell::new(App::new(document.clone())));
        {
            let a = app.borrow();
            a.sync_angle_controls(DragTarget::Point1);
            a.sync_angle_controls(DragTarget::Point2);
            a.redraw();
        }

        setup_tension(&app);
        setup_angle(&app, DragTarget::Point1);
        setup_angle(&app, DragTarget::Point2);
        setup_selectors(&app);
        setup_drag(&app, &document);

        if let Some(window) = web_sys::window() {
            let app = app.clone();
            listen(&window, "resize", move |_| app.borrow().redraw());
        }

        log::info!("Pulley calculator running!");
    }

    fn setup_tension(app: &Rc<RefCell<App>>) {
        let a = app.borrow();

        if let Some(field) = a.input("tension") {
            let app = app.clone();
            let field_clone = field.clone();
            listen(&field, "input", move |_| {
                let mut g = app.borrow_mut();
                g.calc.set_tension_text(&field_clone.value());
                if let Some(slider) = g.input("tension-slider") {
                    slider.set_value(&g.calc.config().tension.to_string());
                }
                g.redraw();
            });
        }

        if let Some(slider) = a.input("tension-slider") {
            let app = app.clone();
            let slider_clone = slider.clone();
            listen(&slider, "input", move |_| {
                let mut g = app.borrow_mut();
                g.calc.set_tension(parse_number(&slider_clone.value()));
                if let Some(field) = g.input("tension") {
                    field.set_value(&g.calc.config().tension.to_string());
                }
                g.redraw();
            });
        }
    }

    fn setup_angle(app: &Rc<RefCell<App>>, target: DragTarget) {
        let a = app.borrow();
        let (field_id, slider_id) = angle_ids(target);

        if let Some(field) = a.input(field_id) {
            let app = app.clone();
            let field_clone = field.clone();
            listen(&field, "input", move |_| {
                let mut g = app.borrow_mut();
                g.calc.set_angle_text(target, &field_clone.value());
                g.sync_angle_slider(target);
                g.redraw();
            });
        }

        if let Some(slider) = a.input(slider_id) {
            let app = app.clone();
            let slider_clone = slider.clone();
            listen(&slider, "input", move |_| {
                let mut g = app.borrow_mut();
                g.calc
                    .set_angle_degrees(target, parse_number(&slider_clone.value()));
                if let Some(field) = g.input(field_id) {
                    field.set_value(&g.calc.angle_text(target));
                }
                g.redraw();
            });
        }

        if let Some(select) = a.element(unit_id(target)) {
            let app = app.clone();
            listen(&select, "change", move |_| {
                let mut g = app.borrow_mut();
                let Some(value) = g.select_value(unit_id(target)) else {
                    return;
                };
                match AngleUnit::from_str(&value) {
                    Some(unit) => {
                        g.calc.set_angle_unit(target, unit);
                        g.sync_angle_controls(target);
                        g.redraw();
                    }
                    None => log::warn!("Unknown angle unit: {}", value),
                }
            });
        }
    }

    fn setup_selectors(app: &Rc<RefCell<App>>) {
        let a = app.borrow();

        if let Some(select) = a.element("wrap-direction") {
            let app = app.clone();
            listen(&select, "change", move |_| {
                let mut g = app.borrow_mut();
                let value = g.select_value("wrap-direction").unwrap_or_default();
                match WrapDirection::from_str(&value) {
                    Some(wrap) => {
                        g.calc.set_wrap_direction(wrap);
                        g.redraw();
                    }
                    None => log::warn!("Unknown wrap direction: {}", value),
                }
            });
        }

        if let Some(select) = a.element("contact-mode") {
            let app = app.clone();
            listen(&select, "change", move |_| {
                let mut g = app.borrow_mut();
                let value = g.select_value("contact-mode").unwrap_or_default();
                match ContactMode::from_str(&value) {
                    Some(mode) => {
                        g.calc.set_contact_mode(mode);
                        g.redraw();
                    }
                    None => log::warn!("Unknown contact mode: {}", value),
                }
            });
        }
    }

    fn setup_drag(app: &Rc<RefCell<App>>, document: &Document) {
        for target in [DragTarget::Point1, DragTarget::Point2] {
            let Some(point) = app.borrow().element(point_id(target)) else {
                continue;
            };
            for event in ["mousedown", "touchstart"] {
                let app = app.clone();
                listen(&point, event, move |e| {
                    e.prevent_default();
                    let mut g = app.borrow_mut();
                    g.calc.start_drag(target);
                    g.set_dragging_style(true);
                });
            }
        }

        for event in ["mousemove", "touchmove"] {
            let app = app.clone();
            listen(document, event, move |e| {
                let mut g = app.borrow_mut();
                let Some(target) = g.calc.drag_target() else {
                    return;
                };
                e.prevent_default();
                let (Some(client), Some(rect)) = (pointer_position(&e), g.client_rect()) else {
                    return;
                };
                if g.calc.drag_to(client, &rect).is_some() {
                    g.sync_angle_controls(target);
                    g.redraw();
                }
            });
        }

        for event in ["mouseup", "touchend"] {
            let app = app.clone();
            listen(document, event, move |_| {
                let mut g = app.borrow_mut();
                if g.calc.is_dragging() {
                    g.calc.end_drag();
                    g.set_dragging_style(false);
                }
            });
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use std::path::PathBuf;

    use clap::Parser;
    use serde::Serialize;

    use pulley_calc::consts::{DEFAULT_TENSION, DEFAULT_THETA1_DEG, DEFAULT_THETA2_DEG};
    use pulley_calc::diagram::{Diagram, render_document};
    use pulley_calc::engine::Angle;
    use pulley_calc::{
        AngleUnit, CalculationResult, Configuration, ContactMode, PulleyError, ResultText,
        Settings, WrapDirection, calculate,
    };

    /// Rope-and-pulley force calculator
    #[derive(Parser, Debug)]
    #[command(name = "pulley-calc", version, about)]
    pub struct Args {
        /// Rope tension in Newtons
        #[arg(long, default_value_t = DEFAULT_TENSION, allow_negative_numbers = true)]
        pub tension: f64,

        /// Angle of contact point 1 (start of the wrap)
        #[arg(long, default_value_t = DEFAULT_THETA1_DEG, allow_negative_numbers = true)]
        pub theta1: f64,

        /// Unit of theta1: deg, rad or pi
        #[arg(long, default_value = "deg", value_parser = parse_unit)]
        pub theta1_unit: AngleUnit,

        /// Angle of contact point 2 (end of the wrap)
        #[arg(long, default_value_t = DEFAULT_THETA2_DEG, allow_negative_numbers = true)]
        pub theta2: f64,

        /// Unit of theta2: deg, rad or pi
        #[arg(long, default_value = "deg", value_parser = parse_unit)]
        pub theta2_unit: AngleUnit,

        /// Wrap direction from point 1 to point 2: ccw or cw
        #[arg(long, default_value = "ccw", value_parser = parse_wrap)]
        pub wrap: WrapDirection,

        /// How the rope leaves the pulley: tangential or perpendicular
        #[arg(long, default_value = "tangential", value_parser = parse_mode)]
        pub mode: ContactMode,

        /// Print results as JSON
        #[arg(long)]
        pub json: bool,

        /// Write the diagram to this SVG file
        #[arg(long)]
        pub svg: Option<PathBuf>,

        /// Diagram settings JSON file
        #[arg(long)]
        pub settings: Option<PathBuf>,
    }

    fn parse_unit(s: &str) -> Result<AngleUnit, String> {
        AngleUnit::from_str(s).ok_or_else(|| format!("unknown angle unit '{}'", s))
    }

    fn parse_wrap(s: &str) -> Result<WrapDirection, String> {
        WrapDirection::from_str(s).ok_or_else(|| format!("unknown wrap direction '{}'", s))
    }

    fn parse_mode(s: &str) -> Result<ContactMode, String> {
        ContactMode::from_str(s).ok_or_else(|| format!("unknown contact mode '{}'", s))
    }

    #[derive(Serialize)]
    struct Report<'a> {
        configuration: &'a Configuration,
        result: &'a CalculationResult,
        text: ResultText,
    }

    impl Args {
        pub fn configuration(&self) -> Configuration {
            Configuration {
                tension: self.tension,
                theta1: Angle::new(self.theta1, self.theta1_unit),
                theta2: Angle::new(self.theta2, self.theta2_unit),
                wrap_direction: self.wrap,
                contact_mode: self.mode,
            }
        }
    }

    pub fn run(args: &Args) -> Result<(), PulleyError> {
        let settings = match &args.settings {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };

        let config = args.configuration();
        let result = calculate(&config);
        let text = ResultText::from_result(&result);

        if args.json {
            let report = Report {
                configuration: &config,
                result: &result,
                text,
            };
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| PulleyError::Output(e.to_string()))?;
            println!("{}", json);
        } else {
            println!("{}", text);
        }

        if let Some(path) = &args.svg {
            let diagram = Diagram::layout(&config, &result, &settings);
            std::fs::write(path, render_document(&diagram, &settings))
                .map_err(|e| PulleyError::Output(format!("{}: {}", path.display(), e)))?;
            log::info!("Diagram written to {}", path.display());
        }

        Ok(())
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use clap::Parser;

    env_logger::init();
    let args = cli::Args::parse();
    log::debug!("{:?}", args);

    if let Err(e) = cli::run(&args) {
        log::error!("{}", e);
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
