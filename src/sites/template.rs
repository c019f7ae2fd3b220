//! Site configuration rendering.
//!
//! Renders the fixed vhost template used by Create. The shape is fixed;
//! domains and directory paths come from [`TemplateConfig`] so the renderer
//! carries no built-in environment assumptions.

use crate::config::schema::TemplateConfig;
use crate::sites::name::SiteName;

/// Render a complete site configuration for `name` proxying to `address`.
///
/// The output contains an upstream block targeting `address:443` and a
/// server block listening on 80 and 443 with TLS, per-site certificate,
/// key and log paths, and a reverse-proxy location with forwarded-host
/// headers and a 600 second read timeout.
pub fn render_site_config(name: &SiteName, address: &str, template: &TemplateConfig) -> String {
    format!(
        r#"upstream {name} {{
    server {address}:443;
}}

server {{
    server_name {name}.{server_domain};

    listen 80;
    listen 443 ssl;

    ssl on;
    ssl_certificate {ssl_cert_dir}/{name}.crt;
    ssl_certificate_key {ssl_cert_dir}/{name}.key;
    ssl_session_cache builtin:1000 shared:SSL:10m;
    ssl_protocols TLSv1 TLSv1.1 TLSv1.2;
    ssl_prefer_server_ciphers on;

    access_log {log_dir}/{name}.access.log;
    error_log  {log_dir}/{name}.error.log warn;

    location / {{
        proxy_pass https://{name}.{upstream_domain};
        proxy_set_header X-Forwarded-For $proxy_add_x_forwarded_for;
        proxy_set_header Host $http_host;
        proxy_read_timeout 600s;
    }}
}}
"#,
        name = name,
        address = address,
        server_domain = template.server_domain,
        upstream_domain = template.upstream_domain,
        ssl_cert_dir = template.ssl_cert_dir,
        log_dir = template.log_dir,
    )
}
