// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 RootChecker

//! RootChecker JNI bindings
//!
//! Exposes the integrity probe to `com.broscr.rootchecker.RootChecker`.
//! Build strings and the application context come from Kotlin; proxy
//! configuration is read from JVM system properties.

use jni::objects::{JClass, JObject, JString, JValue};
use jni::sys::{jboolean, jstring, JNI_FALSE, JNI_TRUE};
use jni::JNIEnv;
use rootchecker_core::{
    is_debuggable, ApplicationFlags, BuildInfo, DeviceIntegrityProbe, IntegrityReport,
    ProbeConfig, ProxySettings,
};
use serde::Serialize;

#[cfg(target_os = "android")]
use android_logger::Config;
#[cfg(target_os = "android")]
use log::LevelFilter;

const ROOT_FALLBACK_JSON: &str = r#"{"is_rooted":false,"detection_methods":[]}"#;
const REPORT_FALLBACK_JSON: &str = concat!(
    r#"{"is_rooted":false,"is_emulator":false,"is_using_proxy":false,"#,
    r#""is_debuggable":false,"root_detection_methods":[]}"#,
);

fn to_jboolean(value: bool) -> jboolean {
    if value {
        JNI_TRUE
    } else {
        JNI_FALSE
    }
}

/// Serializes `value`, falling back to a fixed negative document
fn to_json_or<T: Serialize>(value: &T, fallback: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|err| {
        log::debug!("Serialization failed: {}", err);
        fallback.to_string()
    })
}

fn new_jstring(env: &mut JNIEnv, text: &str, fallback: &str) -> jstring {
    match env.new_string(text) {
        Ok(jstr) => jstr.into_raw(),
        Err(_) => {
            clear_exception(env);
            match env.new_string(fallback) {
                Ok(jstr) => jstr.into_raw(),
                Err(_) => {
                    clear_exception(env);
                    std::ptr::null_mut()
                }
            }
        }
    }
}

/// Drops a pending Java exception so the caller sees a plain result
fn clear_exception(env: &mut JNIEnv) {
    if env.exception_check().unwrap_or(false) {
        let _ = env.exception_clear();
    }
}

fn jstring_or_empty(env: &mut JNIEnv, value: &JString) -> String {
    if value.is_null() {
        return String::new();
    }
    match env.get_string(value) {
        Ok(s) => s.into(),
        Err(err) => {
            clear_exception(env);
            log::debug!("Build string unavailable: {}", err);
            String::new()
        }
    }
}

// ============================================================================
// Host lookups
// ============================================================================

fn system_property(env: &mut JNIEnv, key: &str) -> jni::errors::Result<Option<String>> {
    let jkey = env.new_string(key)?;
    let value = env
        .call_static_method(
            "java/lang/System",
            "getProperty",
            "(Ljava/lang/String;)Ljava/lang/String;",
            &[JValue::from(&jkey)],
        )?
        .l()?;
    if value.is_null() {
        return Ok(None);
    }
    let value = JString::from(value);
    let text: String = env.get_string(&value)?.into();
    Ok(Some(text))
}

fn system_property_or_none(env: &mut JNIEnv, key: &str) -> Option<String> {
    match system_property(env, key) {
        Ok(value) => value,
        Err(err) => {
            clear_exception(env);
            log::debug!("System property {} unavailable: {}", key, err);
            None
        }
    }
}

fn jvm_proxy_settings(env: &mut JNIEnv) -> ProxySettings {
    ProxySettings {
        https_host: system_property_or_none(env, "https.proxyHost"),
        https_port: system_property_or_none(env, "https.proxyPort"),
        http_host: system_property_or_none(env, "http.proxyHost"),
        http_port: system_property_or_none(env, "http.proxyPort"),
    }
}

fn application_flags(env: &mut JNIEnv, context: &JObject) -> jni::errors::Result<ApplicationFlags> {
    let info = env
        .call_method(
            context,
            "getApplicationInfo",
            "()Landroid/content/pm/ApplicationInfo;",
            &[],
        )?
        .l()?;
    let flags = env.get_field(&info, "flags", "I")?.i()?;
    Ok(ApplicationFlags(flags))
}

fn context_is_debuggable(env: &mut JNIEnv, context: &JObject) -> bool {
    match application_flags(env, context) {
        Ok(flags) => is_debuggable(&flags),
        Err(err) => {
            clear_exception(env);
            log::debug!("Application flags unavailable: {}", err);
            false
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn build_info(
    env: &mut JNIEnv,
    model: &JString,
    manufacturer: &JString,
    product: &JString,
    device: &JString,
    hardware: &JString,
    brand: &JString,
    fingerprint: &JString,
) -> BuildInfo {
    BuildInfo {
        fingerprint: jstring_or_empty(env, fingerprint),
        model: jstring_or_empty(env, model),
        manufacturer: jstring_or_empty(env, manufacturer),
        brand: jstring_or_empty(env, brand),
        device: jstring_or_empty(env, device),
        hardware: jstring_or_empty(env, hardware),
        product: jstring_or_empty(env, product),
    }
}

// ============================================================================
// JNI Bindings
// ============================================================================

/// Initialize logging for Android
#[cfg(target_os = "android")]
#[no_mangle]
pub extern "C" fn Java_com_broscr_rootchecker_RootChecker_nativeInit(_env: JNIEnv, _class: JClass) {
    android_logger::init_once(
        Config::default()
            .with_max_level(LevelFilter::Info)
            .with_tag("RustRootChecker"),
    );
}

#[cfg(not(target_os = "android"))]
#[no_mangle]
pub extern "C" fn Java_com_broscr_rootchecker_RootChecker_nativeInit(_env: JNIEnv, _class: JClass) {
    // No-op for non-Android platforms
}

/// Blocks on filesystem and `su`; call from a worker thread
#[no_mangle]
pub extern "C" fn Java_com_broscr_rootchecker_RootChecker_nativeIsRooted(
    _env: JNIEnv,
    _class: JClass,
) -> jboolean {
    to_jboolean(rootchecker_core::is_rooted())
}

/// Returns JSON string with RootDetectionResult
#[no_mangle]
pub extern "C" fn Java_com_broscr_rootchecker_RootChecker_nativeDetectRoot(
    mut env: JNIEnv,
    _class: JClass,
) -> jstring {
    let result = DeviceIntegrityProbe::new(ProbeConfig::default()).detect_root();
    let json = to_json_or(&result, ROOT_FALLBACK_JSON);
    new_jstring(&mut env, &json, ROOT_FALLBACK_JSON)
}

/// Build properties are passed from Kotlin (Android Build API)
#[allow(clippy::too_many_arguments)]
#[no_mangle]
pub extern "C" fn Java_com_broscr_rootchecker_RootChecker_nativeIsEmulator(
    mut env: JNIEnv,
    _class: JClass,
    model: JString,
    manufacturer: JString,
    product: JString,
    device: JString,
    hardware: JString,
    brand: JString,
    fingerprint: JString,
) -> jboolean {
    let build = build_info(
        &mut env,
        &model,
        &manufacturer,
        &product,
        &device,
        &hardware,
        &brand,
        &fingerprint,
    );
    to_jboolean(build.is_emulator())
}

#[no_mangle]
pub extern "C" fn Java_com_broscr_rootchecker_RootChecker_nativeIsUsingProxy(
    mut env: JNIEnv,
    _class: JClass,
) -> jboolean {
    to_jboolean(jvm_proxy_settings(&mut env).is_using_proxy())
}

#[no_mangle]
pub extern "C" fn Java_com_broscr_rootchecker_RootChecker_nativeIsDebuggable(
    mut env: JNIEnv,
    _class: JClass,
    context: JObject,
) -> jboolean {
    to_jboolean(context_is_debuggable(&mut env, &context))
}

/// Returns JSON string with IntegrityReport
#[allow(clippy::too_many_arguments)]
#[no_mangle]
pub extern "C" fn Java_com_broscr_rootchecker_RootChecker_nativeReport(
    mut env: JNIEnv,
    _class: JClass,
    context: JObject,
    model: JString,
    manufacturer: JString,
    product: JString,
    device: JString,
    hardware: JString,
    brand: JString,
    fingerprint: JString,
) -> jstring {
    let root = DeviceIntegrityProbe::new(ProbeConfig::default()).detect_root();
    let build = build_info(
        &mut env,
        &model,
        &manufacturer,
        &product,
        &device,
        &hardware,
        &brand,
        &fingerprint,
    );

    let report = IntegrityReport {
        is_rooted: root.is_rooted,
        is_emulator: build.is_emulator(),
        is_using_proxy: jvm_proxy_settings(&mut env).is_using_proxy(),
        is_debuggable: context_is_debuggable(&mut env, &context),
        root_detection_methods: root.detection_methods,
    };

    let json = to_json_or(&report, REPORT_FALLBACK_JSON);
    new_jstring(&mut env, &json, REPORT_FALLBACK_JSON)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rootchecker_core::RootDetectionResult;

    #[test]
    fn test_jboolean_mapping() {
        assert_eq!(to_jboolean(true), JNI_TRUE);
        assert_eq!(to_jboolean(false), JNI_FALSE);
    }

    #[test]
    fn test_fallback_documents_parse() {
        let root: RootDetectionResult = serde_json::from_str(ROOT_FALLBACK_JSON).unwrap();
        assert!(!root.is_rooted);

        let report: IntegrityReport = serde_json::from_str(REPORT_FALLBACK_JSON).unwrap();
        assert_eq!(
            report,
            IntegrityReport {
                is_rooted: false,
                is_emulator: false,
                is_using_proxy: false,
                is_debuggable: false,
                root_detection_methods: vec![],
            }
        );
    }

    #[test]
    fn test_report_json() {
        let report = IntegrityReport {
            is_rooted: false,
            is_emulator: true,
            is_using_proxy: false,
            is_debuggable: true,
            root_detection_methods: vec![],
        };
        let json = to_json_or(&report, REPORT_FALLBACK_JSON);
        assert!(json.contains(r#""is_emulator":true"#));
        assert!(json.contains(r#""is_debuggable":true"#));
    }
}
