//! Studio Motion entry point
//!
//! On the web: wires DOM events to a [`Presentation`] and writes transforms
//! back each frame. Natively: prints a personalization preview of the
//! content directory.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_site {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        AddEventListenerOptions, Document, Element, HtmlElement, HtmlInputElement,
        HtmlTextAreaElement, MouseEvent, PageTransitionEvent, ScrollBehavior, ScrollToOptions,
        TouchEvent, Window,
    };

    use studio_motion::contact::{ContactField, ContactFormState, LogSink};
    use studio_motion::content::{ContentProvider, EmbeddedContent, Service};
    use studio_motion::goal::Goal;
    use studio_motion::motion::{MagneticElement, Scheduler};
    use studio_motion::rotation::{CAROUSEL_INTERVAL_MS, Carousel, CarouselView, LOGO_SWAP_INTERVAL_MS, LogoGrid};
    use studio_motion::timeline::{ContainerGeometry, GeometryProvider, section_height_vh};
    use studio_motion::{MotionSettings, Presentation, Rect, Viewport};

    /// Callbacks and handles shared between the scheduler and the page
    #[derive(Default)]
    struct BrowserHooks {
        frame_cb: RefCell<Option<Closure<dyn FnMut(f64)>>>,
        timer_cb: RefCell<Option<Closure<dyn FnMut()>>>,
        frame_handle: Cell<Option<i32>>,
        timer_handle: Cell<Option<i32>>,
        running: Cell<bool>,
    }

    impl BrowserHooks {
        fn request_frame(&self) {
            if self.frame_handle.get().is_some() {
                return;
            }
            let Some(window) = web_sys::window() else {
                return;
            };
            if let Some(cb) = self.frame_cb.borrow().as_ref() {
                self.frame_handle
                    .set(window.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
            }
        }
    }

    /// `requestAnimationFrame` + `setTimeout` backed scheduler
    struct BrowserScheduler {
        hooks: Rc<BrowserHooks>,
    }

    impl Scheduler for BrowserScheduler {
        fn start_frames(&mut self) {
            self.hooks.running.set(true);
            self.hooks.request_frame();
        }

        fn stop_frames(&mut self) {
            self.hooks.running.set(false);
            if let Some(handle) = self.hooks.frame_handle.take() {
                if let Some(window) = web_sys::window() {
                    let _ = window.cancel_animation_frame(handle);
                }
            }
        }

        fn frames_running(&self) -> bool {
            self.hooks.running.get()
        }

        fn arm_idle_timer(&mut self, delay_ms: f64) {
            self.disarm_idle_timer();
            let Some(window) = web_sys::window() else {
                return;
            };
            if let Some(cb) = self.hooks.timer_cb.borrow().as_ref() {
                let handle = window
                    .set_timeout_with_callback_and_timeout_and_arguments_0(
                        cb.as_ref().unchecked_ref(),
                        delay_ms.ceil() as i32,
                    )
                    .ok();
                self.hooks.timer_handle.set(handle);
            }
        }

        fn disarm_idle_timer(&mut self) {
            if let Some(handle) = self.hooks.timer_handle.take() {
                if let Some(window) = web_sys::window() {
                    window.clear_timeout_with_handle(handle);
                }
            }
        }
    }

    /// Live bounds of a `data-magnetic` element
    struct DomMagnet(Element);

    impl MagneticElement for DomMagnet {
        fn bounds(&self) -> Rect {
            let r = self.0.get_bounding_client_rect();
            Rect::new(r.left() as f32, r.top() as f32, r.width() as f32, r.height() as f32)
        }
    }

    /// Live geometry of the pinned process section
    struct DomGeometry(Element);

    impl GeometryProvider for DomGeometry {
        fn container_geometry(&self) -> ContainerGeometry {
            let r = self.0.get_bounding_client_rect();
            ContainerGeometry {
                top: r.top() as f32,
                height: r.height() as f32,
            }
        }

        fn viewport_height(&self) -> f32 {
            web_sys::window()
                .and_then(|w| w.inner_height().ok())
                .and_then(|v| v.as_f64())
                .unwrap_or(0.0) as f32
        }
    }

    type Page = Presentation<BrowserScheduler>;

    /// Everything the handlers share
    struct Site {
        page: RefCell<Page>,
        hooks: Rc<BrowserHooks>,
        magnets: Vec<HtmlElement>,
        services: Vec<Service>,
        contact: RefCell<ContactFormState>,
        logos: RefCell<LogoGrid>,
        carousel: RefCell<Carousel>,
        client_logos: Vec<(String, String)>,
        /// Interval handles with the callbacks they fire
        rotators: RefCell<Vec<(i32, Closure<dyn FnMut()>)>>,
        listeners_live: Cell<bool>,
    }

    fn window() -> Window {
        web_sys::window().expect("no window")
    }

    fn document() -> Document {
        window().document().expect("no document")
    }

    fn query_all(selector: &str) -> Vec<Element> {
        let Ok(list) = document().query_selector_all(selector) else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn by_id(id: &str) -> Option<HtmlElement> {
        document()
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    }

    fn set_class(el: &Element, class: &str, on: bool) {
        let _ = el.class_list().toggle_with_force(class, on);
    }

    fn viewport() -> Viewport {
        let w = window();
        let width = w.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let height = w.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        Viewport::new(width as f32, height as f32)
    }

    fn now() -> f64 {
        js_sys::Date::now()
    }

    fn listen<E: JsCast + 'static>(
        target: &web_sys::EventTarget,
        kind: &str,
        passive: bool,
        mut handler: impl FnMut(E) + 'static,
    ) {
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
            handler(event.unchecked_into::<E>())
        });
        let options = AddEventListenerOptions::new();
        options.set_passive(passive);
        let _ = target.add_event_listener_with_callback_and_add_event_listener_options(
            kind,
            closure.as_ref().unchecked_ref(),
            &options,
        );
        closure.forget();
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Studio Motion starting...");

        let content = EmbeddedContent::bundled();
        let services = content.services().unwrap_or_else(|e| {
            log::error!("{}", e);
            Vec::new()
        });
        let clients = content.clients().unwrap_or_else(|e| {
            log::error!("{}", e);
            Default::default()
        });
        let steps = content.process().map(|p| p.steps.len()).unwrap_or(0);

        let hooks = Rc::new(BrowserHooks::default());
        let settings = MotionSettings::load();
        let mut page = Presentation::new(
            settings,
            BrowserScheduler {
                hooks: hooks.clone(),
            },
            viewport(),
        );

        // Magnetic elements register in document order
        let magnets: Vec<HtmlElement> = query_all("[data-magnetic=\"true\"]")
            .into_iter()
            .filter_map(|el| el.dyn_into::<HtmlElement>().ok())
            .collect();
        for (i, el) in magnets.iter().enumerate() {
            page.register_magnetic_target(i as u32, Box::new(DomMagnet(el.clone().into())));
        }
        log::info!("Registered {} magnetic targets", magnets.len());

        if let Some(process) = by_id("process") {
            let _ = process
                .style()
                .set_property("height", &format!("{}vh", section_height_vh(steps)));
            page.attach_timeline(steps, Box::new(DomGeometry(process.into())));
        }

        let image_count = query_all("#goal-hero .carousel-image").len();
        let seed = now() as u64;
        let site = Rc::new(Site {
            page: RefCell::new(page),
            hooks: hooks.clone(),
            magnets,
            services,
            contact: RefCell::new(ContactFormState::new()),
            logos: RefCell::new(LogoGrid::new(clients.clients.len(), seed)),
            carousel: RefCell::new(Carousel::new(image_count)),
            client_logos: clients
                .clients
                .iter()
                .map(|c| (c.name.clone(), c.logo.clone()))
                .collect(),
            rotators: RefCell::new(Vec::new()),
            listeners_live: Cell::new(true),
        });

        install_scheduler_callbacks(&site);
        setup_pointer_handlers(&site);
        setup_scroll_handlers(&site);
        setup_goal_handlers(&site);
        setup_contact_form(&site);
        setup_rotators(&site);
        setup_teardown(&site);

        apply_goal(&site);
        render_timeline(&site);
        render_cursor(&site);

        log::info!("Studio Motion running!");
    }

    fn install_scheduler_callbacks(site: &Rc<Site>) {
        {
            let site = site.clone();
            let frame = Closure::<dyn FnMut(f64)>::new(move |time: f64| {
                site.hooks.frame_handle.set(None);
                if !site.listeners_live.get() {
                    return;
                }
                site.page.borrow_mut().on_frame(time);
                render_cursor(&site);
                if site.hooks.running.get() {
                    site.hooks.request_frame();
                }
            });
            *site.hooks.frame_cb.borrow_mut() = Some(frame);
        }
        {
            let site = site.clone();
            let timer = Closure::<dyn FnMut()>::new(move || {
                site.hooks.timer_handle.set(None);
                site.page.borrow_mut().on_idle_timeout(now());
                render_cursor(&site);
            });
            *site.hooks.timer_cb.borrow_mut() = Some(timer);
        }
    }

    fn setup_pointer_handlers(site: &Rc<Site>) {
        let win: web_sys::EventTarget = window().into();

        {
            let site = site.clone();
            listen(&win, "mousemove", true, move |event: MouseEvent| {
                let pos = Vec2::new(event.client_x() as f32, event.client_y() as f32);
                site.page.borrow_mut().on_pointer_move(pos, now());
                render_magnets(&site);
                render_cursor(&site);
            });
        }

        {
            let site = site.clone();
            listen(&win, "wheel", true, move |_event: web_sys::WheelEvent| {
                site.page.borrow_mut().on_wheel(now());
            });
        }

        {
            let site = site.clone();
            listen(&win, "click", true, move |_event: MouseEvent| {
                let clicked = now();
                site.page.borrow_mut().on_click(clicked);
                render_cursor(&site);
                // Clear the ripple once it has played
                let duration = site.page.borrow().settings().ripple_duration_ms;
                let site = site.clone();
                let clear = Closure::once_into_js(move || render_cursor(&site));
                let _ = window().set_timeout_with_callback_and_timeout_and_arguments_0(
                    clear.unchecked_ref(),
                    duration.ceil() as i32,
                );
            });
        }

        if let Some(root) = document().document_element() {
            let site = site.clone();
            let root: web_sys::EventTarget = root.into();
            listen(&root, "mouseleave", true, move |_event: MouseEvent| {
                site.page.borrow_mut().on_pointer_leave();
                render_magnets(&site);
                render_cursor(&site);
            });
        }

        {
            let site = site.clone();
            listen(&win, "resize", true, move |_event: web_sys::Event| {
                site.page.borrow_mut().set_viewport(viewport());
                render_timeline(&site);
            });
        }
    }

    fn setup_scroll_handlers(site: &Rc<Site>) {
        let win: web_sys::EventTarget = window().into();
        {
            let site = site.clone();
            listen(&win, "scroll", true, move |_event: web_sys::Event| {
                let scroll_y = window().scroll_y().unwrap_or(0.0);
                site.page.borrow_mut().on_scroll(scroll_y);
                render_timeline(&site);
            });
        }

        let Some(process) = document().get_element_by_id("process") else {
            return;
        };
        let process: web_sys::EventTarget = process.into();

        {
            let site = site.clone();
            listen(&process, "touchstart", true, move |event: TouchEvent| {
                if let Some(touch) = event.touches().get(0) {
                    let point = Vec2::new(touch.client_x() as f32, touch.client_y() as f32);
                    site.page.borrow_mut().on_touch_start(point);
                }
            });
        }

        {
            // Not passive: horizontal swipes must be able to block page scroll
            let site = site.clone();
            listen(&process, "touchmove", false, move |event: TouchEvent| {
                if let Some(touch) = event.touches().get(0) {
                    let point = Vec2::new(touch.client_x() as f32, touch.client_y() as f32);
                    let response = site.page.borrow_mut().on_touch_move(point);
                    if response.suppress_scroll {
                        event.prevent_default();
                    }
                    render_timeline(&site);
                }
            });
        }

        {
            let site = site.clone();
            listen(&process, "touchend", true, move |_event: TouchEvent| {
                let request = site.page.borrow_mut().on_touch_end();
                if let Some(request) = request {
                    let options = ScrollToOptions::new();
                    options.set_top(request.delta_y as f64);
                    options.set_behavior(if request.smooth {
                        ScrollBehavior::Smooth
                    } else {
                        ScrollBehavior::Auto
                    });
                    window().scroll_by_with_scroll_to_options(&options);
                }
                render_timeline(&site);
            });
        }

        {
            let site = site.clone();
            listen(&process, "touchcancel", true, move |_event: TouchEvent| {
                site.page.borrow_mut().on_touch_cancel();
                render_timeline(&site);
            });
        }
    }

    fn setup_goal_handlers(site: &Rc<Site>) {
        for button in query_all("[data-goal]") {
            let site = site.clone();
            let target: web_sys::EventTarget = button.clone().into();
            listen(&target, "click", true, move |_event: MouseEvent| {
                let Some(goal) = button.get_attribute("data-goal").and_then(|id| Goal::from_id(&id))
                else {
                    log::warn!("Unknown goal on button");
                    return;
                };
                site.page.borrow_mut().on_goal_select(goal);
                apply_goal(&site);
            });
        }

        if let Some(logo) = document().get_element_by_id("logo") {
            let site = site.clone();
            let target: web_sys::EventTarget = logo.into();
            listen(&target, "click", true, move |_event: MouseEvent| {
                site.page.borrow_mut().on_goal_reset();
                apply_goal(&site);
                let options = ScrollToOptions::new();
                options.set_top(0.0);
                options.set_behavior(ScrollBehavior::Smooth);
                window().scroll_to_with_scroll_to_options(&options);
            });
        }
    }

    fn field_value(name: &str) -> String {
        let Ok(Some(el)) = document().query_selector(&format!("#contact-form [name=\"{name}\"]"))
        else {
            return String::new();
        };
        if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
            return input.value();
        }
        if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
            return area.value();
        }
        String::new()
    }

    fn show_contact_error(message: Option<&str>) {
        if let Some(el) = by_id("contact-error") {
            el.set_text_content(message);
            set_class(&el, "hidden", message.is_none());
        }
    }

    fn setup_contact_form(site: &Rc<Site>) {
        let Some(form) = document().get_element_by_id("contact-form") else {
            return;
        };
        let form: web_sys::EventTarget = form.into();

        {
            let site = site.clone();
            listen(&form, "input", true, move |event: web_sys::Event| {
                let Some(name) = event
                    .target()
                    .and_then(|t| t.dyn_into::<Element>().ok())
                    .and_then(|el| el.get_attribute("name"))
                else {
                    return;
                };
                if let Some(field) = ContactField::from_name(&name) {
                    let mut contact = site.contact.borrow_mut();
                    contact.edit(field, field_value(&name));
                    show_contact_error(contact.error());
                }
            });
        }

        {
            let site = site.clone();
            listen(&form, "submit", false, move |event: web_sys::Event| {
                event.prevent_default();
                let mut contact = site.contact.borrow_mut();
                for name in ["name", "business", "email", "phone", "message"] {
                    if let Some(field) = ContactField::from_name(name) {
                        contact.form.set(field, field_value(name));
                    }
                }
                match contact.submit(&mut LogSink) {
                    Ok(message) => {
                        show_contact_error(None);
                        let _ = window().alert_with_message(message);
                    }
                    Err(_) => show_contact_error(contact.error()),
                }
            });
        }
    }

    /// Run `tick` every `interval_ms` until teardown
    fn every(site: &Site, interval_ms: f64, tick: Closure<dyn FnMut()>) {
        match window().set_interval_with_callback_and_timeout_and_arguments_0(
            tick.as_ref().unchecked_ref(),
            interval_ms as i32,
        ) {
            Ok(handle) => site.rotators.borrow_mut().push((handle, tick)),
            Err(e) => log::warn!("setInterval failed: {:?}", e),
        }
    }

    fn setup_rotators(site: &Rc<Site>) {
        {
            let shared = site.clone();
            let tick = Closure::<dyn FnMut()>::new(move || {
                let site = &shared;
                let changed = site.logos.borrow_mut().advance(LOGO_SWAP_INTERVAL_MS);
                if changed.is_empty() {
                    return;
                }
                let slots = query_all("#clients-grid img");
                let logos = site.logos.borrow();
                for slot in changed {
                    let (Some(img), Some(&client)) = (slots.get(slot), logos.slots().get(slot))
                    else {
                        continue;
                    };
                    if let Some((name, logo)) = site.client_logos.get(client) {
                        let _ = img.set_attribute("src", logo);
                        let _ = img.set_attribute("alt", name);
                    }
                }
            });
            every(site, LOGO_SWAP_INTERVAL_MS, tick);
        }

        {
            let shared = site.clone();
            let tick = Closure::<dyn FnMut()>::new(move || {
                let view = shared.carousel.borrow_mut().advance(CAROUSEL_INTERVAL_MS);
                render_carousel(view);
            });
            every(site, CAROUSEL_INTERVAL_MS, tick);
        }
        render_carousel(site.carousel.borrow().view());
    }

    fn setup_teardown(site: &Rc<Site>) {
        let site = site.clone();
        let win: web_sys::EventTarget = window().into();
        listen(&win, "pagehide", true, move |event: PageTransitionEvent| {
            // Pages entering the back/forward cache come back intact
            if event.persisted() {
                return;
            }
            site.listeners_live.set(false);
            site.page.borrow_mut().teardown();
            for (handle, _tick) in site.rotators.borrow_mut().drain(..) {
                window().clear_interval_with_handle(handle);
            }
            // Break the site <-> callback cycle
            site.hooks.frame_cb.borrow_mut().take();
            site.hooks.timer_cb.borrow_mut().take();
        });
    }

    fn render_cursor(site: &Site) {
        let (state, ripple) = {
            let page = site.page.borrow();
            (page.cursor_render_state(), page.ripple_active(now()))
        };
        let position = format!("translate3d({:.2}px, {:.2}px, 0) translate(-50%, -50%)", state.x, state.y);
        let display = if state.visible { "block" } else { "none" };

        if let Some(ring) = by_id("cursor-ring") {
            let style = ring.style();
            let _ = style.set_property("transform", &format!("{} scale({:.4})", position, state.scale));
            let _ = style.set_property("display", display);
        }
        if let Some(dot) = by_id("cursor-dot") {
            let style = dot.style();
            let _ = style.set_property("transform", &position);
            let _ = style.set_property("display", display);
        }
        if let Some(ripple_el) = by_id("cursor-ripple") {
            let _ = ripple_el.style().set_property("transform", &position);
            set_class(&ripple_el, "active", ripple && state.visible);
        }
    }

    fn render_magnets(site: &Site) {
        let offsets = site.page.borrow().magnetic_offsets();
        for (id, offset) in offsets {
            if let Some(el) = site.magnets.get(id as usize) {
                let _ = el
                    .style()
                    .set_property("transform", &format!("translate({:.2}px, {:.2}px)", offset.x, offset.y));
            }
        }
    }

    fn render_timeline(site: &Site) {
        let (timeline, nav_scrolled) = {
            let page = site.page.borrow();
            (page.timeline_render_state(), page.nav_scrolled())
        };

        if let Some(nav) = document().get_element_by_id("nav") {
            set_class(&nav, "scrolled", nav_scrolled);
        }

        let Some(t) = timeline else {
            return;
        };
        if let Some(track) = by_id("process-track") {
            let _ = track
                .style()
                .set_property("transform", &format!("translateX(-{:.3}vw)", t.track_offset_vw));
        }
        if let Some(progress) = by_id("process-progress") {
            let _ = progress
                .style()
                .set_property("width", &format!("{:.2}%", t.timeline_progress_percent));
        }
        if let Some(gallery) = by_id("process-gallery") {
            let _ = gallery
                .style()
                .set_property("transform", &format!("translateX(-{:.3}%)", t.gallery_offset_percent));
        }
        if let Some(spotlight) = by_id("process-spotlight") {
            let _ = spotlight.style().set_property(
                "background",
                &format!(
                    "radial-gradient(ellipse at {:.1}% 50%, rgba(18, 222, 186, 0.1) 0%, transparent 60%)",
                    t.spotlight_x_percent
                ),
            );
        }
        if let Some(header) = document().get_element_by_id("process-header") {
            set_class(&header, "visible", t.header_visible);
        }
        for (i, dot) in query_all("#process .process-dot").iter().enumerate() {
            set_class(dot, "reached", t.step_reached(i));
        }
    }

    fn render_carousel(view: CarouselView) {
        let images = query_all("#goal-hero .carousel-image");
        for (i, img) in images.iter().enumerate() {
            set_class(img, "active", view == CarouselView::Image(i));
        }
        if let Some(empty) = document().get_element_by_id("carousel-empty") {
            set_class(&empty, "hidden", view != CarouselView::Placeholder);
        }
    }

    /// Reorder sections and services for the current goal
    fn apply_goal(site: &Site) {
        let (goal, order, services) = {
            let page = site.page.borrow();
            (
                page.current_goal(),
                page.current_section_order(),
                page.prioritized_services(&site.services),
            )
        };

        if let Some(container) = document().get_element_by_id("sections") {
            for section in order.sections() {
                if let Ok(Some(el)) =
                    container.query_selector(&format!("[data-section=\"{}\"]", section.id()))
                {
                    // Appending an existing child moves it to the end
                    let _ = container.append_child(&el);
                }
            }
        }

        if let Some(list) = document().get_element_by_id("services-list") {
            let cards = query_all("#services-list [data-service]");
            for card in &cards {
                set_class(card, "hidden", true);
            }
            for service in &services {
                if let Some(card) = cards
                    .iter()
                    .find(|c| c.get_attribute("data-service").as_deref() == Some(service.id.as_str()))
                {
                    set_class(card, "hidden", false);
                    let _ = list.append_child(card);
                }
            }
        }

        if let Some(hero) = document().get_element_by_id("goal-hero") {
            set_class(&hero, "hidden", !goal.shows_goal_hero());
            let _ = hero.set_attribute("data-goal", goal.id());
        }
        if let Ok(Some(message)) = document().query_selector("#contact-form [name=\"message\"]") {
            let _ = message.set_attribute("placeholder", goal.message_placeholder());
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_site::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use studio_motion::content::{ContentProvider, DirContent};

    env_logger::init();
    log::info!("Studio Motion (native) starting...");

    let root = std::env::args().nth(1).unwrap_or_else(|| "content".to_string());
    let content = DirContent::new(&root);
    let services = match content.services() {
        Ok(services) => services,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };
    let steps = content.process().map(|p| p.steps.len()).unwrap_or_else(|e| {
        log::warn!("{}", e);
        0
    });

    println!("Content: {} ({} services, {} process steps)", root, services.len(), steps);
    preview_goals(&services);
    preview_cursor();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Print the page layout each goal produces
#[cfg(not(target_arch = "wasm32"))]
fn preview_goals(services: &[studio_motion::content::Service]) {
    use studio_motion::goal::{Goal, GoalSelector, prioritize_services};

    let mut selector = GoalSelector::new();
    for goal in std::iter::once(Goal::None).chain(Goal::SELECTABLE) {
        selector.select(goal);
        let sections: Vec<_> = selector.section_order().sections().iter().map(|s| s.id()).collect();
        let ordered: Vec<_> = prioritize_services(goal, services)
            .into_iter()
            .map(|s| s.id)
            .collect();
        println!(
            "\n{:<10} {:?}\n  sections: {}\n  services: {}",
            goal.id(),
            selector.section_order(),
            sections.join(" > "),
            ordered.join(", ")
        );
    }
}

/// Replay a short pointer session headlessly
#[cfg(not(target_arch = "wasm32"))]
fn preview_cursor() {
    use glam::Vec2;
    use studio_motion::motion::ManualScheduler;
    use studio_motion::{MotionSettings, Presentation, Rect, Viewport};

    let mut page = Presentation::new(
        MotionSettings::default(),
        ManualScheduler::new(),
        Viewport::new(1280.0, 800.0),
    );
    page.register_magnetic_target(0, Box::new(Rect::new(760.0, 380.0, 120.0, 48.0)));
    page.on_pointer_move(Vec2::new(400.0, 400.0), 0.0);
    page.on_idle_timeout(1000.0);

    println!("\nCursor drift from (400, 400):");
    let mut t = 1000.0;
    for frame in 1..=120 {
        t += 16.0;
        page.on_frame(t);
        if frame % 30 == 0 {
            let c = page.cursor_render_state();
            println!("  frame {:>3}: ({:.1}, {:.1}) scale {:.3}", frame, c.x, c.y, c.scale);
        }
    }
}
