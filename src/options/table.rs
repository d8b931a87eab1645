//! The builtin option table and its custom handlers

use tracing::debug;

use super::form::{parse_form, parse_form_string};
use super::params;
use super::registry::{ArgShape, Handler, OptionDescriptor, Value};
use crate::errors::{PlanError, Result};
use crate::operation::{AuthMask, ClobberMode, DataKind, DataPart, HttpVersion, SecretString};
use crate::resolver::Resolver;

use ArgShape::{Bool, File, None as Flag, String as Text};

fn opt(name: &'static str, short: Option<char>, shape: ArgShape, handler: Handler) -> OptionDescriptor {
    OptionDescriptor::new(name, short, shape, handler)
}

/// Every option in table order
pub fn builtin_options() -> Vec<OptionDescriptor> {
    vec![
        // Operations and directive sources
        opt("url", None, Text, Handler::AppendUrl),
        opt("next", Some(':'), Flag, Handler::Custom(next_operation)),
        opt("config", Some('K'), File, Handler::Custom(include_config)),
        opt("disable", Some('q'), Flag, Handler::Custom(disable)),
        // Tool-wide switches
        opt("verbose", Some('v'), Bool, Handler::Custom(verbose)),
        opt("silent", Some('s'), Bool, Handler::Custom(silent)),
        opt("show-error", Some('S'), Bool, Handler::Custom(show_error)),
        // Request
        opt("header", Some('H'), Text, Handler::AppendList(|op| &mut op.headers)),
        opt("data", Some('d'), Text, Handler::Custom(data_ascii)),
        opt("data-ascii", None, Text, Handler::Custom(data_ascii)),
        opt("data-raw", None, Text, Handler::Custom(data_raw)),
        opt("data-binary", None, Text, Handler::Custom(data_binary)),
        opt("data-urlencode", None, Text, Handler::Custom(data_urlencode)),
        opt("form", Some('F'), Text, Handler::Custom(form)),
        opt("form-string", None, Text, Handler::Custom(form_string)),
        opt("request", Some('X'), Text, Handler::SetString(|op| &mut op.custom_request)),
        opt("user-agent", Some('A'), Text, Handler::SetString(|op| &mut op.user_agent)),
        opt("referer", Some('e'), Text, Handler::SetString(|op| &mut op.referer)),
        opt("cookie", Some('b'), Text, Handler::AppendList(|op| &mut op.cookies)),
        opt("cookie-jar", Some('c'), File, Handler::SetString(|op| &mut op.cookie_jar)),
        // Authentication
        opt("user", Some('u'), Text, Handler::Custom(user)),
        opt("proxy-user", Some('U'), Text, Handler::Custom(proxy_user)),
        opt("basic", None, Bool, Handler::Custom(auth_method)),
        opt("digest", None, Bool, Handler::Custom(auth_method)),
        opt("negotiate", None, Bool, Handler::Custom(auth_method)),
        opt("ntlm", None, Bool, Handler::Custom(auth_method)),
        opt("anyauth", None, Bool, Handler::Custom(auth_method)),
        opt("delegation", None, Text, Handler::Custom(delegation)),
        // Transport
        opt("proxy", Some('x'), Text, Handler::SetString(|op| &mut op.proxy)),
        opt("insecure", Some('k'), Bool, Handler::SetBool(|op| &mut op.insecure_ok)),
        opt("cert", Some('E'), Text, Handler::Custom(cert)),
        opt("key", None, File, Handler::SetString(|op| &mut op.key)),
        opt("cacert", None, File, Handler::SetString(|op| &mut op.cacert)),
        opt("ftp-method", None, Text, Handler::Custom(ftp_method)),
        opt("compressed", None, Bool, Handler::SetBool(|op| &mut op.compressed)),
        opt("http1.0", Some('0'), Flag, Handler::Custom(http_version)),
        opt("http1.1", None, Flag, Handler::Custom(http_version)),
        opt("http2", None, Flag, Handler::Custom(http_version)),
        // Behaviour
        opt("location", Some('L'), Bool, Handler::SetBool(|op| &mut op.follow_location)),
        opt("max-redirs", None, Text, Handler::Custom(max_redirs)),
        opt("fail", Some('f'), Bool, Handler::SetBool(|op| &mut op.fail_on_error)),
        opt("head", Some('I'), Bool, Handler::Custom(head)),
        opt("get", Some('G'), Bool, Handler::SetBool(|op| &mut op.use_http_get)),
        opt("include", Some('i'), Bool, Handler::SetBool(|op| &mut op.show_headers)),
        opt("remote-header-name", Some('J'), Bool, Handler::SetBool(|op| &mut op.content_disposition)),
        opt("connect-timeout", None, Text, Handler::Custom(connect_timeout)),
        opt("max-time", Some('m'), Text, Handler::Custom(max_time)),
        opt("max-filesize", None, Text, Handler::Custom(max_filesize)),
        opt("range", Some('r'), Text, Handler::Custom(range)),
        opt("continue-at", Some('C'), Text, Handler::Custom(continue_at)),
        // Output routing
        opt("output", Some('o'), File, Handler::Custom(output)),
        opt("remote-name", Some('O'), Bool, Handler::Custom(remote_name)),
        opt("remote-name-all", None, Bool, Handler::SetBool(|op| &mut op.remote_name_all)),
        opt("upload-file", Some('T'), File, Handler::Custom(upload_file)),
        opt("globoff", Some('g'), Bool, Handler::SetBool(|op| &mut op.glob_off)),
        opt("dump-header", Some('D'), File, Handler::SetString(|op| &mut op.dump_header)),
        opt("write-out", Some('w'), Text, Handler::SetString(|op| &mut op.write_out)),
        opt("clobber", None, Bool, Handler::Custom(clobber)),
        opt("create-dirs", None, Bool, Handler::SetBool(|op| &mut op.create_dirs)),
    ]
}

fn next_operation(r: &mut Resolver<'_>, _: &'static str, _: Value<'_>) -> Result<()> {
    r.global_mut().next_operation();
    Ok(())
}

fn include_config(r: &mut Resolver<'_>, _: &'static str, value: Value<'_>) -> Result<()> {
    r.include(value.text())
}

fn disable(_: &mut Resolver<'_>, name: &'static str, _: Value<'_>) -> Result<()> {
    debug!(option = name, "ignored outside the first argument");
    Ok(())
}

fn verbose(r: &mut Resolver<'_>, _: &'static str, value: Value<'_>) -> Result<()> {
    r.global_mut().verbose = value.enabled();
    Ok(())
}

fn silent(r: &mut Resolver<'_>, _: &'static str, value: Value<'_>) -> Result<()> {
    r.global_mut().silent = value.enabled();
    Ok(())
}

fn show_error(r: &mut Resolver<'_>, _: &'static str, value: Value<'_>) -> Result<()> {
    r.global_mut().show_error = value.enabled();
    Ok(())
}

fn push_data(r: &mut Resolver<'_>, kind: DataKind, value: Value<'_>) -> Result<()> {
    r.current_mut().data.push(DataPart::new(kind, value.text()));
    Ok(())
}

fn data_ascii(r: &mut Resolver<'_>, _: &'static str, value: Value<'_>) -> Result<()> {
    push_data(r, DataKind::Ascii, value)
}

fn data_raw(r: &mut Resolver<'_>, _: &'static str, value: Value<'_>) -> Result<()> {
    push_data(r, DataKind::Raw, value)
}

fn data_binary(r: &mut Resolver<'_>, _: &'static str, value: Value<'_>) -> Result<()> {
    push_data(r, DataKind::Binary, value)
}

fn data_urlencode(r: &mut Resolver<'_>, _: &'static str, value: Value<'_>) -> Result<()> {
    push_data(r, DataKind::UrlEncode, value)
}

fn form(r: &mut Resolver<'_>, name: &'static str, value: Value<'_>) -> Result<()> {
    let parts = parse_form(&format!("--{name}"), value.text())?;
    r.current_mut().form.extend(parts);
    Ok(())
}

fn form_string(r: &mut Resolver<'_>, name: &'static str, value: Value<'_>) -> Result<()> {
    let part = parse_form_string(&format!("--{name}"), value.text())?;
    r.current_mut().form.push(part);
    Ok(())
}

fn user(r: &mut Resolver<'_>, _: &'static str, value: Value<'_>) -> Result<()> {
    r.current_mut().user = Some(SecretString::from(value.text()));
    Ok(())
}

fn proxy_user(r: &mut Resolver<'_>, _: &'static str, value: Value<'_>) -> Result<()> {
    r.current_mut().proxy_user = Some(SecretString::from(value.text()));
    Ok(())
}

fn auth_method(r: &mut Resolver<'_>, name: &'static str, value: Value<'_>) -> Result<()> {
    let bit = match name {
        "basic" => AuthMask::BASIC,
        "digest" => AuthMask::DIGEST,
        "negotiate" => AuthMask::NEGOTIATE,
        "ntlm" => AuthMask::NTLM,
        _ => AuthMask::ANY,
    };
    let auth = &mut r.current_mut().auth;
    if value.enabled() {
        auth.insert(bit);
    } else {
        auth.remove(bit);
    }
    Ok(())
}

fn delegation(r: &mut Resolver<'_>, name: &'static str, value: Value<'_>) -> Result<()> {
    r.current_mut().delegation = Some(params::parse_delegation(name, value.text())?);
    Ok(())
}

fn cert(r: &mut Resolver<'_>, _: &'static str, value: Value<'_>) -> Result<()> {
    let (name, passphrase) = params::parse_cert(value.text());
    let op = r.current_mut();
    op.cert = Some(name);
    op.cert_passphrase = passphrase.map(SecretString::from);
    Ok(())
}

fn ftp_method(r: &mut Resolver<'_>, name: &'static str, value: Value<'_>) -> Result<()> {
    r.current_mut().ftp_method = Some(params::parse_ftp_method(name, value.text())?);
    Ok(())
}

fn http_version(r: &mut Resolver<'_>, name: &'static str, _: Value<'_>) -> Result<()> {
    let version = match name {
        "http1.0" => HttpVersion::Http10,
        "http1.1" => HttpVersion::Http11,
        _ => HttpVersion::Http2,
    };
    r.current_mut().http_version = Some(version);
    Ok(())
}

fn max_redirs(r: &mut Resolver<'_>, name: &'static str, value: Value<'_>) -> Result<()> {
    r.current_mut().max_redirs = Some(params::parse_redirs(name, value.text())?);
    Ok(())
}

fn head(r: &mut Resolver<'_>, _: &'static str, value: Value<'_>) -> Result<()> {
    let op = r.current_mut();
    op.no_body = value.enabled();
    if value.enabled() {
        op.show_headers = true;
        op.use_http_get = false;
    }
    Ok(())
}

fn connect_timeout(r: &mut Resolver<'_>, name: &'static str, value: Value<'_>) -> Result<()> {
    r.current_mut().connect_timeout = Some(params::parse_secs(name, value.text())?);
    Ok(())
}

fn max_time(r: &mut Resolver<'_>, name: &'static str, value: Value<'_>) -> Result<()> {
    r.current_mut().max_time = Some(params::parse_secs(name, value.text())?);
    Ok(())
}

fn max_filesize(r: &mut Resolver<'_>, name: &'static str, value: Value<'_>) -> Result<()> {
    r.current_mut().max_filesize = Some(params::parse_size(name, value.text())?);
    Ok(())
}

fn range(r: &mut Resolver<'_>, name: &'static str, value: Value<'_>) -> Result<()> {
    let op = r.current_mut();
    if op.resume.is_some() {
        return Err(PlanError::ConflictingOption {
            option: format!("--{name}"),
            conflicts_with: "continue-at".to_string(),
        });
    }
    op.range = Some(params::parse_range(name, value.text())?);
    Ok(())
}

fn continue_at(r: &mut Resolver<'_>, name: &'static str, value: Value<'_>) -> Result<()> {
    let op = r.current_mut();
    if op.range.is_some() {
        return Err(PlanError::ConflictingOption {
            option: format!("--{name}"),
            conflicts_with: "range".to_string(),
        });
    }
    op.resume = Some(params::parse_resume(name, value.text())?);
    Ok(())
}

fn output(r: &mut Resolver<'_>, _: &'static str, value: Value<'_>) -> Result<()> {
    r.global_mut().bind_output(value.text());
    Ok(())
}

fn remote_name(r: &mut Resolver<'_>, _: &'static str, value: Value<'_>) -> Result<()> {
    r.global_mut().bind_remote_name(value.enabled());
    Ok(())
}

fn upload_file(r: &mut Resolver<'_>, _: &'static str, value: Value<'_>) -> Result<()> {
    r.global_mut().bind_upload(value.text());
    Ok(())
}

fn clobber(r: &mut Resolver<'_>, _: &'static str, value: Value<'_>) -> Result<()> {
    r.current_mut().clobber = if value.enabled() {
        ClobberMode::Always
    } else {
        ClobberMode::Never
    };
    Ok(())
}
