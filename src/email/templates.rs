pub fn render_password_reset(token: &str, reset_url: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"></head>
<body style="font-family: sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;">
    <h2>Reset Password</h2>
    <p>You are receiving this email because we received a password reset request for your account.</p>
    <p><a href="{reset_url}" style="display: inline-block; padding: 10px 20px; background: #0070f3; color: white; text-decoration: none; border-radius: 4px;">Reset Password</a></p>
    <p>Your reset token is: <code>{token}</code></p>
    <p style="color: #666; font-size: 14px;">The token can be used once. If you did not request a password reset, no further action is required.</p>
</body>
</html>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn includes_token_and_link() {
        let html = render_password_reset("tok", "http://x/reset-password?token=tok");
        assert!(html.contains("<code>tok</code>"));
        assert!(html.contains(r#"href="http://x/reset-password?token=tok""#));
    }
}
