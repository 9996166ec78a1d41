// ============================================================================
// AUTH VIEW - Formularios de login y registro
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, HtmlInputElement};

use crate::dom::{append_child, get_element_by_id, on_click, on_submit, ElementBuilder};
use crate::services::RegisterRequest;
use crate::state::AppState;
use crate::viewmodels::SessionViewModel;

/// Renderizar la vista de autenticación (login o registro según el estado)
pub fn render_auth(state: &AppState) -> Result<Element, JsValue> {
    if *state.show_register.borrow() {
        render_register_form(state)
    } else {
        render_login_form(state)
    }
}

/// Leer el valor de un input por ID. Vacío si el input no existe.
fn input_value(id: &str) -> String {
    get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        .map(|input| input.value())
        .unwrap_or_default()
}

fn labeled_input(
    form: &Element,
    id: &str,
    label: &str,
    input_type: &str,
    placeholder: &str,
) -> Result<(), JsValue> {
    let group = ElementBuilder::new("div")?
        .class("form-group")
        .child(ElementBuilder::new("label")?.attr("for", id)?.text(label).build())?
        .child(
            ElementBuilder::new("input")?
                .id(id)?
                .attr("type", input_type)?
                .attr("placeholder", placeholder)?
                .attr("required", "required")?
                .build(),
        )?
        .build();
    append_child(form, &group)
}

fn auth_error_banner(state: &AppState) -> Result<Option<Element>, JsValue> {
    match state.get_auth_error() {
        Some(error) => Ok(Some(
            ElementBuilder::new("div")?.class("auth-error").text(&error).build(),
        )),
        None => Ok(None),
    }
}

fn render_login_form(state: &AppState) -> Result<Element, JsValue> {
    let container = ElementBuilder::new("div")?
        .class("auth-container")
        .child(
            ElementBuilder::new("h1")?
                .class("auth-title")
                .text("Partner Login")
                .build(),
        )?
        .build();

    if *state.register_success.borrow() {
        let banner = ElementBuilder::new("div")?
            .class("auth-success")
            .text("Registration successful! Please login.")
            .build();
        append_child(&container, &banner)?;
    }

    if let Some(banner) = auth_error_banner(state)? {
        append_child(&container, &banner)?;
    }

    let form = ElementBuilder::new("form")?.class("auth-form").build();
    labeled_input(&form, "login-email", "Email", "email", "you@example.com")?;
    labeled_input(&form, "login-password", "Password", "password", "Password")?;

    let submit = ElementBuilder::new("button")?
        .class("btn btn-primary btn-block")
        .attr("type", "submit")?
        .text(if state.session.get_loading() {
            "Logging in..."
        } else {
            "Login"
        })
        .build();
    append_child(&form, &submit)?;

    {
        let state_clone = state.clone();
        on_submit(&form, move |_| {
            let state = state_clone.clone();
            let email = input_value("login-email");
            let password = input_value("login-password");
            spawn_local(async move {
                SessionViewModel::new().login(&state, &email, &password).await;
            });
        })?;
    }
    append_child(&container, &form)?;

    // Link al registro
    let switch = ElementBuilder::new("p")?
        .class("auth-switch")
        .text("Don't have an account? ")
        .build();
    let link = ElementBuilder::new("a")?
        .class("auth-link")
        .attr("href", "#")?
        .text("Register")
        .build();
    {
        let state_clone = state.clone();
        on_click(&link, move |e| {
            e.prevent_default();
            state_clone.set_show_register(true);
        })?;
    }
    append_child(&switch, &link)?;
    append_child(&container, &switch)?;

    Ok(container)
}

fn render_register_form(state: &AppState) -> Result<Element, JsValue> {
    let container = ElementBuilder::new("div")?
        .class("auth-container")
        .child(
            ElementBuilder::new("h1")?
                .class("auth-title")
                .text("Partner Registration")
                .build(),
        )?
        .build();

    if let Some(banner) = auth_error_banner(state)? {
        append_child(&container, &banner)?;
    }

    let form = ElementBuilder::new("form")?.class("auth-form").build();
    labeled_input(&form, "reg-first-name", "First Name", "text", "First name")?;
    labeled_input(&form, "reg-last-name", "Last Name", "text", "Last name")?;
    labeled_input(&form, "reg-phone", "Phone", "tel", "Phone number")?;
    labeled_input(&form, "reg-email", "Email", "email", "you@example.com")?;
    labeled_input(&form, "reg-vehicle-type", "Vehicle Type", "text", "bike / scooter / car")?;
    labeled_input(&form, "reg-vehicle-number", "Vehicle Number", "text", "Vehicle number")?;
    labeled_input(&form, "reg-password", "Password", "password", "Password")?;
    labeled_input(
        &form,
        "reg-confirm-password",
        "Confirm Password",
        "password",
        "Repeat password",
    )?;

    let submit = ElementBuilder::new("button")?
        .class("btn btn-primary btn-block")
        .attr("type", "submit")?
        .text(if state.session.get_loading() {
            "Registering..."
        } else {
            "Register"
        })
        .build();
    append_child(&form, &submit)?;

    {
        let state_clone = state.clone();
        on_submit(&form, move |_| {
            let state = state_clone.clone();
            let request = RegisterRequest {
                first_name: input_value("reg-first-name"),
                last_name: input_value("reg-last-name"),
                phone: input_value("reg-phone"),
                email: input_value("reg-email"),
                vehicle_type: input_value("reg-vehicle-type"),
                vehicle_number: input_value("reg-vehicle-number"),
                password: input_value("reg-password"),
            };
            let confirm = input_value("reg-confirm-password");
            spawn_local(async move {
                SessionViewModel::new().register(&state, request, &confirm).await;
            });
        })?;
    }
    append_child(&container, &form)?;

    // Volver al login
    let switch = ElementBuilder::new("p")?
        .class("auth-switch")
        .text("Already have an account? ")
        .build();
    let link = ElementBuilder::new("a")?
        .class("auth-link")
        .attr("href", "#")?
        .text("Login")
        .build();
    {
        let state_clone = state.clone();
        on_click(&link, move |e| {
            e.prevent_default();
            state_clone.set_show_register(false);
        })?;
    }
    append_child(&switch, &link)?;
    append_child(&container, &switch)?;

    Ok(container)
}
