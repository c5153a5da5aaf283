//! How the customer pays. Each method validates its own input locally; nothing here talks to a
//! payment provider.
use crate::order_flow::PaymentError;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

const CARD_DIGITS: usize = 16;

/// The payment option picked on the payment screen, with whatever the user typed.
#[derive(Clone, PartialEq, Eq)]
pub enum PaymentSelection {
    CashOnDelivery,
    MobileWalletTransfer { account: String },
    Card { number: String },
}

/// The confirmed method, stripped of the account or card details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    CashOnDelivery,
    MobileWalletTransfer,
    Card,
}

impl Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PaymentMethod::CashOnDelivery => "Cash on Delivery",
            PaymentMethod::MobileWalletTransfer => "Mobile Wallet",
            PaymentMethod::Card => "Debit Card",
        })
    }
}

impl fmt::Debug for PaymentSelection {
    // Card numbers and wallet accounts never reach the logs in full.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentSelection::CashOnDelivery => f.write_str("CashOnDelivery"),
            PaymentSelection::MobileWalletTransfer { account } => f
                .debug_struct("MobileWalletTransfer")
                .field("account", &mask(account))
                .finish(),
            PaymentSelection::Card { number } => f
                .debug_struct("Card")
                .field("number", &mask(number))
                .finish(),
        }
    }
}

fn mask(input: &str) -> String {
    let trimmed = input.trim();
    let visible: String = trimmed
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    format!("****{visible}")
}

impl PaymentSelection {
    pub fn mobile_wallet(account: impl Into<String>) -> Self {
        Self::MobileWalletTransfer {
            account: account.into(),
        }
    }

    pub fn card(number: impl Into<String>) -> Self {
        Self::Card {
            number: number.into(),
        }
    }

    pub fn method(&self) -> PaymentMethod {
        match self {
            PaymentSelection::CashOnDelivery => PaymentMethod::CashOnDelivery,
            PaymentSelection::MobileWalletTransfer { .. } => PaymentMethod::MobileWalletTransfer,
            PaymentSelection::Card { .. } => PaymentMethod::Card,
        }
    }

    /// Checks the user's input for the selected method.
    ///
    /// - Cash on delivery always passes.
    /// - A wallet account must be non-empty and all digits once trimmed.
    /// - A card number must be exactly 16 digits once trimmed.
    pub fn validate(&self) -> Result<PaymentMethod, PaymentError> {
        match self {
            PaymentSelection::CashOnDelivery => {}
            PaymentSelection::MobileWalletTransfer { account } => {
                let account = account.trim();
                if account.is_empty() || !all_digits(account) {
                    return Err(PaymentError::InvalidWalletAccount);
                }
            }
            PaymentSelection::Card { number } => {
                let number = number.trim();
                if number.len() != CARD_DIGITS || !all_digits(number) {
                    return Err(PaymentError::InvalidCardNumber {
                        expected: CARD_DIGITS,
                    });
                }
            }
        }
        Ok(self.method())
    }
}

fn all_digits(input: &str) -> bool {
    input.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_needs_exactly_sixteen_digits() {
        assert!(PaymentSelection::card("123456789012345").validate().is_err());
        assert!(PaymentSelection::card("12345678901234567").validate().is_err());
        assert!(PaymentSelection::card("1234 5678 9012 34").validate().is_err());
        assert_eq!(
            PaymentSelection::card(" 1234567890123456 ").validate(),
            Ok(PaymentMethod::Card)
        );
    }

    #[test]
    fn test_wallet_account_must_be_digits() {
        assert_eq!(
            PaymentSelection::mobile_wallet("   ").validate(),
            Err(PaymentError::InvalidWalletAccount)
        );
        assert_eq!(
            PaymentSelection::mobile_wallet("0300-1234567").validate(),
            Err(PaymentError::InvalidWalletAccount)
        );
        assert_eq!(
            PaymentSelection::mobile_wallet("03001234567").validate(),
            Ok(PaymentMethod::MobileWalletTransfer)
        );
    }

    #[test]
    fn test_cash_on_delivery_always_passes() {
        assert_eq!(
            PaymentSelection::CashOnDelivery.validate(),
            Ok(PaymentMethod::CashOnDelivery)
        );
    }

    #[test]
    fn test_debug_masks_card_number() {
        let rendered = format!("{:?}", PaymentSelection::card("1234567890123456"));
        assert!(!rendered.contains("12345678"));
        assert!(rendered.contains("****3456"));
    }
}
