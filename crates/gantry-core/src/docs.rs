//! Interactive documentation pages.
//!
//! Renders the Swagger UI, ReDoc and OAuth2 redirect pages for a schema
//! served at a given URL. Serving the pages is left to the HTTP layer;
//! [`App::docs_html`](crate::App::docs_html) and
//! [`App::redoc_html`](crate::App::redoc_html) render them from the
//! registry's configuration.

use serde_json::Value;

const SWAGGER_CDN: &str = "https://cdn.jsdelivr.net/npm/swagger-ui-dist@5";
const REDOC_CDN: &str = "https://cdn.jsdelivr.net/npm/redoc@2";
const FAVICON: &str = "https://fastapi.tiangolo.com/img/favicon.png";

/// Renders the Swagger UI page.
///
/// `oauth2_redirect_url` is handed to Swagger UI for the OAuth2 flows, and
/// `init_oauth`, when set, is passed to `ui.initOAuth`.
#[must_use]
pub fn swagger_ui_html(
    openapi_url: &str,
    title: &str,
    oauth2_redirect_url: Option<&str>,
    init_oauth: Option<&Value>,
) -> String {
    let redirect = oauth2_redirect_url.map_or_else(String::new, |url| {
        format!(
            "\n                oauth2RedirectUrl: window.location.origin + \"{}\",",
            html_escape(url)
        )
    });
    let init_oauth = init_oauth.map_or_else(String::new, |config| {
        format!(
            "\n            ui.initOAuth({});",
            config.to_string().replace("</", "<\\/")
        )
    });

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>{title}</title>
    <link rel="shortcut icon" href="{FAVICON}">
    <link rel="stylesheet" type="text/css" href="{SWAGGER_CDN}/swagger-ui.css">
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="{SWAGGER_CDN}/swagger-ui-bundle.js"></script>
    <script>
        window.onload = function() {{
            const ui = SwaggerUIBundle({{
                url: "{openapi_url}",
                dom_id: "#swagger-ui",{redirect}
                layout: "BaseLayout",
                deepLinking: true,
                showExtensions: true,
                showCommonExtensions: true,
                presets: [
                    SwaggerUIBundle.presets.apis,
                    SwaggerUIBundle.SwaggerUIStandalonePreset
                ]
            }});{init_oauth}
            window.ui = ui;
        }};
    </script>
</body>
</html>"##,
        title = html_escape(title),
        openapi_url = html_escape(openapi_url),
    )
}

/// Renders the ReDoc page.
#[must_use]
pub fn redoc_html(openapi_url: &str, title: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{title}</title>
    <link rel="shortcut icon" href="{FAVICON}">
    <style>
        body {{ margin: 0; padding: 0; }}
    </style>
</head>
<body>
    <redoc spec-url="{openapi_url}"></redoc>
    <script src="{REDOC_CDN}/bundles/redoc.standalone.js"></script>
</body>
</html>"#,
        title = html_escape(title),
        openapi_url = html_escape(openapi_url),
    )
}

/// The page Swagger UI's OAuth2 flows redirect back to.
#[must_use]
pub fn oauth2_redirect_html() -> &'static str {
    r#"<!DOCTYPE html>
<html lang="en">
<head><title>Swagger UI: OAuth2 Redirect</title></head>
<body>
<script>
    'use strict';
    function run() {
        var oauth2 = window.opener.swaggerUIRedirectOauth2;
        var sentState = oauth2.state;
        var redirectUrl = oauth2.redirectUrl;
        var hash = window.location.hash;
        var qp = /code|token|error/.test(hash) ? hash.substring(1) : window.location.search.substring(1);
        var params = new URLSearchParams(qp);
        var query = Object.fromEntries(params.entries());
        var isValid = query.state === sentState;
        var flow = oauth2.auth.schema.get("flow");

        if ((flow === "accessCode" || flow === "authorizationCode" || flow === "authorization_code") && !oauth2.auth.code) {
            if (!isValid) {
                oauth2.errCb({
                    authId: oauth2.auth.name,
                    source: "auth",
                    level: "warning",
                    message: "Authorization may be unsafe, passed state was changed in server."
                });
            }
            if (query.code) {
                delete oauth2.state;
                oauth2.auth.code = query.code;
                oauth2.callback({auth: oauth2.auth, redirectUrl: redirectUrl});
            } else {
                oauth2.errCb({
                    authId: oauth2.auth.name,
                    source: "auth",
                    level: "error",
                    message: query.error
                        ? "[" + query.error + "]: " + (query.error_description || "")
                        : "[Authorization failed]: no accessCode received from the server."
                });
            }
        } else {
            oauth2.callback({auth: oauth2.auth, token: query, isValid: isValid, redirectUrl: redirectUrl});
        }
        window.close();
    }

    if (document.readyState !== "loading") {
        run();
    } else {
        document.addEventListener("DOMContentLoaded", run);
    }
</script>
</body>
</html>"#
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
