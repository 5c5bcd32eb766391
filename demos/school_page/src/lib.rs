// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! School marketing page behaviours, mounted on the page's own markup.
//!
//! Build with: `wasm-pack build --target web demos/school_page`
//! Then load the generated module from the page and serve it. With the
//! `trace` feature, every orchestration event is printed to the console.

#![cfg_attr(
    not(target_arch = "wasm32"),
    allow(dead_code, reason = "this crate only runs in the browser")
)]

use glint_core::config::PageConfig;
use wasm_bindgen::prelude::*;

/// Mounts the page with the shipped configuration.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() -> Result<(), JsValue> {
    let config = PageConfig::standard();

    #[cfg(feature = "trace")]
    glint_backend_web::mount_with_sink(
        config,
        Box::new(glint_debug::pretty::PrettyPrintSink::with_writer(
            console::ConsoleWriter::default(),
        )),
    )?;
    #[cfg(not(feature = "trace"))]
    glint_backend_web::mount(config)?;

    web_sys::console::log_2(
        &JsValue::from_str("%c🎓 Central Public School Website Loaded"),
        &JsValue::from_str("color:#c9a84c;font-size:14px;font-weight:bold;"),
    );
    Ok(())
}

#[cfg(feature = "trace")]
mod console {
    use std::io::{self, Write};

    use wasm_bindgen::JsValue;

    /// Buffers writes and logs each completed line to the browser console.
    #[derive(Debug, Default)]
    pub(crate) struct ConsoleWriter {
        line: Vec<u8>,
    }

    impl Write for ConsoleWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            for &byte in buf {
                if byte == b'\n' {
                    self.flush()?;
                } else {
                    self.line.push(byte);
                }
            }
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            if !self.line.is_empty() {
                let text = String::from_utf8_lossy(&self.line);
                web_sys::console::log_1(&JsValue::from_str(&text));
                self.line.clear();
            }
            Ok(())
        }
    }
}
