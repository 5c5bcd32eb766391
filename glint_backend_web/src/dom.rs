// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resolving the page document into an element store.
//!
//! [`scan`] registers every element a behaviour touches, builds the
//! script-owned chrome (progress bar and lightbox), and returns the live
//! handles that listeners attach to.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use wasm_bindgen::JsCast as _;
use wasm_bindgen::JsValue;
use web_sys::{Document, Element, HtmlElement};

use glint_core::element::{Attributes, ElementId, ElementStore};
use glint_core::form::{Control, Field, FormElements};
use glint_core::lightbox::LightboxElements;
use glint_core::page::PageMarkup;
use glint_core::scroll::Section;

use crate::presenter::control_value;

const PROGRESS_CSS: &str = "position: fixed; top: 0; left: 0; height: 3px; \
    background: linear-gradient(90deg, var(--gold-dark, #a07830), var(--gold, #c9a84c), var(--gold-light, #f0d080)); \
    z-index: 9999; width: 0%; transition: width 0.1s linear; pointer-events: none;";

/// Editable controls of the enquiry form. Button-like and hidden inputs
/// carry no user value and are never reset.
const FORM_CONTROLS: &str = "#contactForm input:not([type=submit]):not([type=button]):not([type=hidden]), \
    #contactForm select, #contactForm textarea";

const LIGHTBOX_CSS: &str = "position: fixed; inset: 0; z-index: 9000; \
    background: rgba(10,22,40,0.96); display: flex; align-items: center; justify-content: center; \
    opacity: 0; pointer-events: none; transition: opacity 0.35s ease; backdrop-filter: blur(12px);";

const LIGHTBOX_INNER_CSS: &str = "position: relative; max-width: 90vw; max-height: 85vh; \
    display: flex; align-items: center; justify-content: center; flex-direction: column; gap: 16px;";

const LIGHTBOX_CLOSE_CSS: &str = "position: absolute; top: -48px; right: 0; \
    background: rgba(255,255,255,0.12); border: none; color: white; font-size: 22px; \
    width: 44px; height: 44px; border-radius: 50%; cursor: pointer; \
    display: flex; align-items: center; justify-content: center; transition: 0.3s ease;";

const LIGHTBOX_CAPTION_CSS: &str = "color: rgba(255,255,255,0.7); font-size: 14px; \
    font-weight: 500; letter-spacing: 0.5px; font-family: 'DM Sans', sans-serif;";

const LIGHTBOX_FRAME_CSS: &str = "width: min(600px, 85vw); height: min(400px, 55vh); \
    border-radius: 16px; background: rgba(255,255,255,0.05); border: 1px solid rgba(255,255,255,0.15); \
    display: flex; align-items: center; justify-content: center;";

const LIGHTBOX_ICON_CSS: &str = "font-size: 80px; color: rgba(201,168,76,0.4);";

/// Everything [`scan`] resolved.
#[derive(Debug)]
pub(crate) struct Scan {
    pub(crate) store: ElementStore,
    pub(crate) elements: Vec<HtmlElement>,
    pub(crate) markup: PageMarkup,
    pub(crate) bindings: Bindings,
}

/// Live elements that receive listeners.
#[derive(Debug, Default)]
pub(crate) struct Bindings {
    pub(crate) navbar: Option<HtmlElement>,
    pub(crate) hamburger: Option<HtmlElement>,
    pub(crate) nav_links: Vec<HtmlElement>,
    pub(crate) anchors: Vec<(HtmlElement, Option<ElementId>)>,
    pub(crate) back_to_top: Option<HtmlElement>,
    pub(crate) gallery: Vec<HtmlElement>,
    pub(crate) lightbox: Option<LightboxBindings>,
    pub(crate) form: Option<HtmlElement>,
    pub(crate) controls: Vec<(Control, HtmlElement)>,
    pub(crate) cards: Vec<(HtmlElement, ElementId)>,
}

#[derive(Debug)]
pub(crate) struct LightboxBindings {
    pub(crate) overlay: HtmlElement,
    pub(crate) close: HtmlElement,
}

/// Registers each DOM element at most once, in slot order. An element that
/// plays several roles keeps one slot and collects the attributes of each.
#[derive(Debug, Default)]
struct Registrar {
    store: ElementStore,
    elements: Vec<HtmlElement>,
}

impl Registrar {
    fn add(&mut self, el: &HtmlElement, key: &str, attrs: Attributes) -> ElementId {
        if let Some(id) = self.find(el) {
            self.store.declare(id, attrs);
            return id;
        }
        let id = self.store.register_with(key, attrs);
        self.elements.push(el.clone());
        id
    }

    fn find(&self, el: &HtmlElement) -> Option<ElementId> {
        self.store
            .ids()
            .zip(&self.elements)
            .find_map(|(id, e)| (e == el).then_some(id))
    }
}

/// Resolves `document` into handles, building the progress bar and lightbox.
pub(crate) fn scan(document: &Document) -> Result<Scan, JsValue> {
    let mut reg = Registrar::default();
    let mut markup = PageMarkup::default();
    let mut bindings = Bindings::default();

    let body = document.body().ok_or_else(|| JsValue::from_str("document has no body"))?;
    markup.body = Some(reg.add(&body, "body", Attributes::default()));

    bindings.navbar = by_id(document, "navbar");
    markup.navbar = bindings.navbar.as_ref().map(|el| reg.add(el, "navbar", Attributes::default()));
    bindings.hamburger = by_id(document, "hamburger");
    markup.hamburger = bindings
        .hamburger
        .as_ref()
        .map(|el| reg.add(el, "hamburger", Attributes::default()));
    markup.nav_links = by_id(document, "navLinks").map(|el| reg.add(&el, "navLinks", Attributes::default()));
    bindings.nav_links = query_all(document, ".nav-link")?;
    bindings.back_to_top = by_id(document, "backToTop");
    markup.back_to_top = bindings
        .back_to_top
        .as_ref()
        .map(|el| reg.add(el, "backToTop", Attributes::default()));

    let progress = element(document, "div")?;
    progress.set_attribute("style", PROGRESS_CSS)?;
    body.append_child(&progress)?;
    markup.progress = Some(reg.add(&progress, "scrollProgress", Attributes::default()));

    if let Some(badge) = query(document, ".hero-badge span")? {
        let id = reg.add(&badge, ".hero-badge span", Attributes::default());
        reg.store.set_text(id, badge.text_content().unwrap_or_default());
        markup.hero_badge = Some(id);
    }

    for section in query_all(document, "section[id]")? {
        let name = section.id();
        let element = reg.add(&section, &name, Attributes::default());
        let selector = format!(".nav-link[href=\"#{name}\"]");
        let link = query(document, &selector)?.map(|l| reg.add(&l, &selector, Attributes::default()));
        markup.sections.push(Section { element, link });
    }

    for el in query_all(document, ".reveal-up, .reveal-left, .reveal-right")? {
        let attrs = Attributes {
            delay: el.get_attribute("data-delay"),
            target: None,
        };
        markup.reveal.push(reg.add(&el, "reveal", attrs));
    }

    for el in query_all(document, ".hero-stats .stat-num[data-target]")? {
        let attrs = Attributes {
            delay: None,
            target: el.get_attribute("data-target"),
        };
        markup.hero_counters.push(reg.add(&el, "stat-num", attrs));
    }

    for el in query_all(document, ".counters-grid .counter-num[data-target]")? {
        // The stagger delay lives on the enclosing item.
        let delay = el
            .closest(".counter-item")?
            .and_then(|item| item.get_attribute("data-delay"));
        let attrs = Attributes {
            delay,
            target: el.get_attribute("data-target"),
        };
        markup.grid_counters.push(reg.add(&el, "counter-num", attrs));
    }

    for el in query_all(document, ".shape")? {
        markup.shapes.push(reg.add(&el, "shape", Attributes::default()));
    }

    let lightbox = build_lightbox(document, &body)?;
    markup.lightbox = Some(LightboxElements {
        overlay: reg.add(&lightbox.overlay, "lightbox", Attributes::default()),
        caption: Some(reg.add(&lightbox.caption, "lightboxCaption", Attributes::default())),
        icon: Some(reg.add(&lightbox.icon, "lightboxIcon", Attributes::default())),
    });
    bindings.lightbox = Some(LightboxBindings {
        overlay: lightbox.overlay,
        close: lightbox.close,
    });

    bindings.form = by_id(document, "contactForm");
    markup.form = scan_form(document, &mut reg, &mut bindings)?;

    for anchor in query_all(document, "a[href^=\"#\"]")? {
        let target = anchor
            .get_attribute("href")
            .and_then(|href| href.strip_prefix('#').filter(|id| !id.is_empty()).map(String::from))
            .and_then(|id| by_id(document, &id).map(|t| reg.add(&t, &id, Attributes::default())));
        bindings.anchors.push((anchor, target));
    }

    for card in query_all(document, ".why-card, .class-card, .teacher-card")? {
        let id = reg.add(&card, "card", Attributes::default());
        bindings.cards.push((card, id));
    }

    for item in query_all(document, ".gallery-img")? {
        let _ = item.style().set_property("cursor", "pointer");
        bindings.gallery.push(item);
    }

    Ok(Scan {
        store: reg.store,
        elements: reg.elements,
        markup,
        bindings,
    })
}

fn scan_form(
    document: &Document,
    reg: &mut Registrar,
    bindings: &mut Bindings,
) -> Result<FormElements, JsValue> {
    let mut form = FormElements::default();
    for (slot, field) in Field::ALL.into_iter().enumerate() {
        if let Some(control) = by_id(document, field.id()) {
            let id = reg.add(&control, field.id(), Attributes::default());
            reg.store
                .record_value(id, control_value(&control).unwrap_or_default());
            form.inputs[slot] = Some(id);
            bindings.controls.push((Control::Field(field), control));
        }
        form.errors[slot] = by_id(document, field.error_id())
            .map(|el| reg.add(&el, field.error_id(), Attributes::default()));
    }
    for control in query_all(document, FORM_CONTROLS)? {
        if bindings.controls.iter().any(|(_, bound)| *bound == control) {
            continue;
        }
        let id = reg.add(&control, "form control", Attributes::default());
        reg.store
            .record_value(id, control_value(&control).unwrap_or_default());
        form.others.push(id);
        bindings.controls.push((Control::Other(id), control));
    }
    form.submit = by_id(document, "submitBtn").map(|el| reg.add(&el, "submitBtn", Attributes::default()));
    form.submit_label = query(document, "#submitBtn span")?
        .map(|el| reg.add(&el, "#submitBtn span", Attributes::default()));
    form.submit_icon = query(document, "#submitBtn i")?
        .map(|el| reg.add(&el, "#submitBtn i", Attributes::default()));
    form.success = by_id(document, "formSuccess").map(|el| reg.add(&el, "formSuccess", Attributes::default()));
    Ok(form)
}

struct LightboxParts {
    overlay: HtmlElement,
    close: HtmlElement,
    caption: HtmlElement,
    icon: HtmlElement,
}

/// Builds the gallery overlay and appends it to `body`.
fn build_lightbox(document: &Document, body: &HtmlElement) -> Result<LightboxParts, JsValue> {
    let overlay = element(document, "div")?;
    overlay.set_attribute("style", LIGHTBOX_CSS)?;

    let inner = element(document, "div")?;
    inner.set_attribute("style", LIGHTBOX_INNER_CSS)?;

    let close = element(document, "button")?;
    close.set_attribute("style", LIGHTBOX_CLOSE_CSS)?;
    close.set_attribute("aria-label", "Close")?;
    let close_icon = element(document, "i")?;
    close_icon.set_class_name("fas fa-times");
    close.append_child(&close_icon)?;

    let frame = element(document, "div")?;
    frame.set_attribute("style", LIGHTBOX_FRAME_CSS)?;
    let icon = element(document, "i")?;
    icon.set_attribute("style", LIGHTBOX_ICON_CSS)?;
    frame.append_child(&icon)?;

    let caption = element(document, "p")?;
    caption.set_attribute("style", LIGHTBOX_CAPTION_CSS)?;

    inner.append_child(&close)?;
    inner.append_child(&frame)?;
    inner.append_child(&caption)?;
    overlay.append_child(&inner)?;
    body.append_child(&overlay)?;

    Ok(LightboxParts {
        overlay,
        close,
        caption,
        icon,
    })
}

fn element(document: &Document, tag: &str) -> Result<HtmlElement, JsValue> {
    Ok(document.create_element(tag)?.unchecked_into())
}

fn by_id(document: &Document, id: &str) -> Option<HtmlElement> {
    document.get_element_by_id(id)?.dyn_into().ok()
}

fn query(document: &Document, selector: &str) -> Result<Option<HtmlElement>, JsValue> {
    Ok(document
        .query_selector(selector)?
        .and_then(|el: Element| el.dyn_into().ok()))
}

fn query_all(document: &Document, selector: &str) -> Result<Vec<HtmlElement>, JsValue> {
    let list = document.query_selector_all(selector)?;
    Ok((0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into().ok())
        .collect())
}
