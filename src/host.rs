//! Heuristics for inferring a remote host name from what a tab exposes:
//! the foreground process command line, the pane title, and the pane's
//! domain name. Every function here is best-effort and returns `None`
//! rather than guessing badly.

use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

/// Process names recognized as SSH-family clients.
const SSH_CLIENTS: &[&str] = &["ssh", "mosh", "mosh-client", "slogin"];

/// SSH options that consume the following argument. Attached forms
/// (`-p2222`) and `--long=value` forms carry their value inline and
/// consume nothing extra.
const SSH_VALUE_FLAGS: &[&str] = &[
    "-b", "-B", "-c", "-D", "-e", "-E", "-F", "-i", "-I", "-J", "-l", "-L", "-m", "-o", "-O",
    "-p", "-P", "-Q", "-R", "-S", "-w", "-W",
];

/// `@host` at the end of a title, e.g. `user@db01` or `vim @ db01`.
static AT_HOST_SUFFIX: OnceLock<Regex> = OnceLock::new();
/// `@host` anywhere in a title.
static AT_HOST_FRAGMENT: OnceLock<Regex> = OnceLock::new();
/// `ssh:`/`sshh:`-prefixed host in a title, e.g. `ssh: db01`.
static SSH_TITLE_PREFIX: OnceLock<Regex> = OnceLock::new();
/// A bare hostname-shaped token.
static HOSTNAME_SHAPED: OnceLock<Regex> = OnceLock::new();

fn at_host_suffix() -> &'static Regex {
    AT_HOST_SUFFIX.get_or_init(|| {
        Regex::new(r"@([A-Za-z0-9][A-Za-z0-9._-]*)\s*$").expect("invalid regex")
    })
}

fn at_host_fragment() -> &'static Regex {
    AT_HOST_FRAGMENT
        .get_or_init(|| Regex::new(r"@([A-Za-z0-9][A-Za-z0-9._-]*)").expect("invalid regex"))
}

fn ssh_title_prefix() -> &'static Regex {
    SSH_TITLE_PREFIX
        .get_or_init(|| Regex::new(r"(?i)\bsshh?:\s*(\S+)").expect("invalid regex"))
}

fn hostname_shaped() -> &'static Regex {
    HOSTNAME_SHAPED.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*$").expect("invalid regex")
    })
}

/// True when the process name is an SSH-family client (basename compared,
/// `.exe` suffix tolerated).
pub(crate) fn is_ssh_client(process_name: &str) -> bool {
    let base = Path::new(process_name)
        .file_name()
        .map(|n| n.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    let base = base.strip_suffix(".exe").unwrap_or(&base);
    SSH_CLIENTS.contains(&base)
}

/// True when `token` looks like a bare hostname (no spaces, no shell
/// syntax).
pub(crate) fn looks_like_hostname(token: &str) -> bool {
    hostname_shaped().is_match(token)
}

/// Scan an SSH-family command line for the destination host: skip option
/// flags (consuming one extra token for flags that take a value) and take
/// the first non-flag token, cleaned of `user@`, IPv6 brackets, and a
/// trailing port.
pub(crate) fn host_from_argv(argv: &[String]) -> Option<String> {
    let mut args = argv.iter().skip(1);
    while let Some(arg) = args.next() {
        if arg.starts_with('-') {
            if SSH_VALUE_FLAGS.contains(&arg.as_str()) {
                args.next();
            }
            continue;
        }
        return clean_host_token(arg);
    }
    None
}

/// Extract a host from a pane title: `@host` suffix first, then an
/// `ssh:`-prefixed host.
pub(crate) fn host_from_title(title: &str) -> Option<String> {
    if let Some(captures) = at_host_suffix().captures(title) {
        return clean_host_token(&captures[1]);
    }
    if let Some(captures) = ssh_title_prefix().captures(title) {
        return clean_host_token(&captures[1]);
    }
    None
}

/// Last-resort extraction: an `@host` fragment anywhere in the title.
pub(crate) fn host_fragment_from_title(title: &str) -> Option<String> {
    at_host_fragment()
        .captures(title)
        .and_then(|captures| clean_host_token(&captures[1]))
}

/// Derive a host from a pane's domain name, e.g. `ssh:user@db01:2222`.
/// Rejects the local domain and purely numeric values, which identify
/// connection slots rather than hosts.
pub(crate) fn host_from_domain(domain: &str) -> Option<String> {
    let mut rest = domain.trim();
    let lower = rest.to_lowercase();
    for scheme in ["ssh://", "mosh://", "ssh:", "mosh:"] {
        if lower.starts_with(scheme) {
            rest = rest[scheme.len()..].trim_start();
            break;
        }
    }
    let host = clean_host_token(rest)?;
    if host.eq_ignore_ascii_case("local") || host.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some(host)
}

/// Strip `user@`, surrounding `[...]` (IPv6), and a trailing `:port` from
/// a destination token.
fn clean_host_token(token: &str) -> Option<String> {
    let mut host = token.trim();
    if let Some((_, after)) = host.rsplit_once('@') {
        host = after;
    }
    if let Some(inner) = host.strip_prefix('[') {
        host = inner.split(']').next().unwrap_or(inner);
    } else if let Some((before, port)) = host.rsplit_once(':')
        && !port.is_empty()
        && port.chars().all(|c| c.is_ascii_digit())
        && !before.contains(':')
    {
        host = before;
    }
    let host = host.trim();
    (!host.is_empty()).then(|| host.to_string())
}
