//! # Destination Value Object
//!
//! 写真の送信先（電話番号とチャネル）

use std::fmt;

use crate::domain::errors::BoothError;

/// 送信チャネル
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Sms,
    WhatsApp,
}

/// 送信先
///
/// 国番号付きの電話番号（`+` で始まる数字列）とチャネル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    number: String,
    channel: Channel,
}

impl Destination {
    /// 入力された電話番号を正規化して送信先を作成します。
    ///
    /// 空白と `-` は取り除かれ、`+` で始まらない番号には
    /// `default_country_code` が前置されます。
    ///
    /// # Errors
    ///
    /// 空、または数字以外の文字を含む場合にエラーを返す
    ///
    /// # 例
    ///
    /// ```
    /// use boothsync::domain::entities::destination::{Channel, Destination};
    ///
    /// let dest = Destination::parse("9123 4567", "+65", Channel::WhatsApp).unwrap();
    /// assert_eq!(dest.number(), "+6591234567");
    /// assert_eq!(dest.address(), "whatsapp:+6591234567");
    ///
    /// let sms = Destination::parse("+1-415-555-0100", "+65", Channel::Sms).unwrap();
    /// assert_eq!(sms.address(), "+14155550100");
    /// ```
    pub fn parse(
        raw: &str,
        default_country_code: &str,
        channel: Channel,
    ) -> Result<Self, BoothError> {
        let invalid = || BoothError::InvalidDestination {
            input: raw.trim().to_string(),
        };

        // 記号だけの入力は空とみなす
        if compact_is_empty(raw) {
            return Err(invalid());
        }

        let compact: String = raw
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-')
            .collect();

        let number = if compact.starts_with('+') {
            compact
        } else {
            let code = default_country_code.trim();
            if code.starts_with('+') {
                format!("{}{}", code, compact)
            } else {
                format!("+{}{}", code, compact)
            }
        };

        let digits = &number[1..];
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        Ok(Self { number, channel })
    }

    /// 正規化済みの電話番号
    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    /// メッセージングAPIに渡すアドレス
    pub fn address(&self) -> String {
        match self.channel {
            Channel::Sms => self.number.clone(),
            Channel::WhatsApp => format!("whatsapp:{}", self.number),
        }
    }
}

fn compact_is_empty(raw: &str) -> bool {
    raw.chars().all(|c| c.is_whitespace() || c == '-' || c == '+')
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_prepends_default_country_code() {
        let dest = Destination::parse("91234567", "+65", Channel::Sms).unwrap();
        assert_eq!(dest.number(), "+6591234567");
    }

    #[test]
    fn test_parse_country_code_without_plus() {
        let dest = Destination::parse("91234567", "65", Channel::Sms).unwrap();
        assert_eq!(dest.number(), "+6591234567");
    }

    #[test]
    fn test_parse_keeps_international_number() {
        let dest = Destination::parse(" +44 7700 900123 ", "+65", Channel::Sms).unwrap();
        assert_eq!(dest.number(), "+447700900123");
    }

    #[test]
    fn test_parse_whatsapp_address() {
        let dest = Destination::parse("91234567", "+65", Channel::WhatsApp).unwrap();
        assert_eq!(dest.address(), "whatsapp:+6591234567");
        assert_eq!(dest.to_string(), "+6591234567");
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!(Destination::parse("", "+65", Channel::Sms).is_err());
        assert!(Destination::parse("   ", "+65", Channel::Sms).is_err());
        assert!(Destination::parse("+", "+65", Channel::Sms).is_err());
    }

    #[test]
    fn test_parse_rejects_letters() {
        let err = Destination::parse("91a34567", "+65", Channel::Sms).unwrap_err();
        assert_eq!(
            err,
            BoothError::InvalidDestination {
                input: "91a34567".to_string()
            }
        );
    }
}
