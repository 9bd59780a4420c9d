//! Cloudflare Turnstile as a `login::challenge::ChallengeProvider`.
//!
//! Mounting appends the provider script to `<head>` and renders the widget
//! explicitly into the page's challenge container once the script loads.
//! Token and expiry callbacks are handed to Turnstile as closures owned by
//! the widget handle; nothing is registered on `window` by this module.
//! Dropping the handle removes the widget and its script tag.
//! Requires a browser environment; native builds report `NoDocument`.

#[cfg(test)]
#[path = "turnstile_test.rs"]
mod turnstile_test;

use login::challenge::{ChallengeCallbacks, ChallengeError, ChallengeProvider, ChallengeWidget};

/// Element id of the container the widget renders into.
pub const CHALLENGE_CONTAINER_ID: &str = "arvon-challenge";

/// Script URL with explicit rendering, so Turnstile does not scan the page
/// for containers on its own.
pub fn script_src(base: &str) -> String {
    let separator = if base.contains('?') { '&' } else { '?' };
    format!("{base}{separator}render=explicit")
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnstileProvider {
    script_url: String,
    container_id: String,
}

impl TurnstileProvider {
    pub fn new(script_url: impl Into<String>, container_id: impl Into<String>) -> Self {
        Self { script_url: script_url.into(), container_id: container_id.into() }
    }
}

/// Handle to a mounted widget. Dropping it tears the widget down.
pub struct TurnstileWidget {
    #[cfg(feature = "csr")]
    mounted: browser::Mounted,
}

impl ChallengeWidget for TurnstileWidget {
    fn reset(&self) {
        #[cfg(feature = "csr")]
        self.mounted.reset();
    }
}

impl ChallengeProvider for TurnstileProvider {
    type Widget = TurnstileWidget;

    fn mount(&self, site_key: &str, callbacks: ChallengeCallbacks) -> Result<Self::Widget, ChallengeError> {
        #[cfg(feature = "csr")]
        {
            let mounted = browser::mount(&script_src(&self.script_url), &self.container_id, site_key, callbacks)?;
            Ok(TurnstileWidget { mounted })
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (site_key, callbacks, &self.container_id);
            Err(ChallengeError::NoDocument)
        }
    }
}

#[cfg(feature = "csr")]
mod browser {
    use std::cell::RefCell;
    use std::rc::Rc;

    use js_sys::{Function, Object, Reflect};
    use login::ChallengeToken;
    use login::challenge::{ChallengeCallbacks, ChallengeError};
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::{JsCast, JsValue};
    use web_sys::HtmlScriptElement;

    pub(super) struct Mounted {
        script: HtmlScriptElement,
        widget_id: Rc<RefCell<Option<JsValue>>>,
        _on_load: Closure<dyn FnMut()>,
        _on_token: Closure<dyn FnMut(String)>,
        _on_expired: Closure<dyn FnMut()>,
    }

    impl Mounted {
        pub(super) fn reset(&self) {
            if let Some(id) = self.widget_id.borrow().as_ref() {
                if let Err(err) = call_turnstile("reset", id) {
                    log::warn!("turnstile reset failed: {err:?}");
                }
            }
        }
    }

    impl Drop for Mounted {
        fn drop(&mut self) {
            if let Some(id) = self.widget_id.borrow_mut().take() {
                let _ = call_turnstile("remove", &id);
            }
            self.script.set_onload(None);
            self.script.remove();
        }
    }

    fn describe(err: &JsValue) -> String {
        format!("{err:?}")
    }

    /// Look up `window.turnstile.<name>` as installed by the provider script.
    fn turnstile_method(name: &str) -> Result<(JsValue, Function), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let turnstile = Reflect::get(&window, &JsValue::from_str("turnstile"))?;
        let method = Reflect::get(&turnstile, &JsValue::from_str(name))?.dyn_into::<Function>()?;
        Ok((turnstile, method))
    }

    fn call_turnstile(name: &str, widget_id: &JsValue) -> Result<JsValue, JsValue> {
        let (turnstile, method) = turnstile_method(name)?;
        method.call1(&turnstile, widget_id)
    }

    fn render_widget(
        container_id: &str,
        site_key: &str,
        on_token: &JsValue,
        on_expired: &JsValue,
    ) -> Result<JsValue, JsValue> {
        let container = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(container_id))
            .ok_or_else(|| JsValue::from_str("challenge container missing"))?;
        let (turnstile, render) = turnstile_method("render")?;

        let options = Object::new();
        Reflect::set(&options, &JsValue::from_str("sitekey"), &JsValue::from_str(site_key))?;
        Reflect::set(&options, &JsValue::from_str("callback"), on_token)?;
        Reflect::set(&options, &JsValue::from_str("expired-callback"), on_expired)?;
        Reflect::set(&options, &JsValue::from_str("error-callback"), on_expired)?;

        render.call2(&turnstile, &container, &options)
    }

    pub(super) fn mount(
        script_src: &str,
        container_id: &str,
        site_key: &str,
        callbacks: ChallengeCallbacks,
    ) -> Result<Mounted, ChallengeError> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or(ChallengeError::NoDocument)?;
        let head = document.head().ok_or(ChallengeError::NoDocument)?;
        let script = document
            .create_element("script")
            .map_err(|e| ChallengeError::Script(describe(&e)))?
            .dyn_into::<HtmlScriptElement>()
            .map_err(|e| ChallengeError::Script(describe(&e)))?;
        script.set_src(script_src);
        script.set_async(true);

        let on_token_cb = Rc::clone(&callbacks.on_token);
        let on_token = Closure::<dyn FnMut(String)>::new(move |raw: String| {
            if let Some(token) = ChallengeToken::new(raw) {
                (on_token_cb)(token);
            }
        });
        let on_expired_cb = Rc::clone(&callbacks.on_expired);
        let on_expired = Closure::<dyn FnMut()>::new(move || (on_expired_cb)());

        let widget_id = Rc::new(RefCell::new(None::<JsValue>));
        let on_load = {
            let slot = Rc::clone(&widget_id);
            let container_id = container_id.to_owned();
            let site_key = site_key.to_owned();
            let token_js: JsValue = on_token.as_ref().clone();
            let expired_js: JsValue = on_expired.as_ref().clone();
            Closure::<dyn FnMut()>::new(move || {
                match render_widget(&container_id, &site_key, &token_js, &expired_js) {
                    Ok(id) => *slot.borrow_mut() = Some(id),
                    Err(err) => log::warn!("turnstile render failed: {}", describe(&err)),
                }
            })
        };
        script.set_onload(Some(on_load.as_ref().unchecked_ref()));

        head.append_child(&script)
            .map_err(|e| ChallengeError::Script(describe(&e)))?;

        Ok(Mounted { script, widget_id, _on_load: on_load, _on_token: on_token, _on_expired: on_expired })
    }
}
