//! Catalog sources: the built-in support table and catalog files.
//!
//! The built-in table is compiled into the binary so a fresh install can
//! answer questions with no configuration. Deployments that want their own
//! wording point `[catalog].path` at a TOML or JSON file instead.
//!
//! # File formats
//!
//! TOML:
//!
//! ```toml
//! [[entries]]
//! question = "Where is my order"
//! answer = "Check 'My Orders' in your account."
//! ```
//!
//! JSON, either a bare array or wrapped in `entries`:
//!
//! ```json
//! [{ "question": "Where is my order", "answer": "Check 'My Orders'." }]
//! ```

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;

use support_bot_core::corpus::Corpus;
use support_bot_core::models::CatalogEntry;

use crate::config::Config;

/// Questions offered to new users as a starting point.
pub const SAMPLE_QUESTIONS: &[&str] = &[
    "Where's my package?",
    "I want to return something",
    "What payment do you take?",
    "How much is shipping?",
    "Need to cancel my order",
    "Is my payment safe?",
    "Talk to a person",
];

/// Built-in customer-support catalog, in match-priority order.
pub const BUILTIN_CATALOG: &[(&str, &str)] = &[
    // Greetings
    ("Hello", "Hi there! Welcome to our Customer Support. I'm your AI assistant, ready to help you 24/7. What can I do for you today?"),
    ("Hi", "Hello! Thanks for reaching out. How can I assist you today?"),
    ("Hey there", "Hey! Great to see you. What would you like help with?"),
    ("Good morning", "Good morning! How can I make your day better?"),

    // Order status
    ("Where is my order", "I can help you track your order! To check your order status:\n\n1. Log into your account\n2. Go to 'My Orders'\n3. Click on the specific order\n\nYou'll see real-time tracking. Orders typically arrive in 3-5 business days. Do you have your order number handy?"),
    ("Track my order", "To track your order:\n• Visit 'My Orders' in your account\n• Select the order you want to track\n• View real-time delivery updates\n\nNeed help finding a specific order? Share your order number!"),
    ("When will my order arrive", "Delivery times depend on your shipping method:\n• Standard: 3-5 business days\n• Express: 1-2 business days\n\nYou can track your order in real-time through 'My Orders'. What's your order number?"),
    ("Order status check", "Let me help you check your order status! Please log into your account and visit 'My Orders' section. You'll find detailed tracking information there. Need specific help with an order?"),

    // Returns and refunds
    ("How do I return an item", "Our return process is simple:\n\n1. Go to 'My Orders'\n2. Select the item to return\n3. Click 'Return Item'\n4. Choose reason and submit\n\nReturns accepted within 30 days. Items must be unused with original packaging. Refunds process in 7-10 days."),
    ("What is your return policy", "Our Return Policy:\n• 30-day return window from delivery\n• Items must be unused and in original packaging\n• Free return shipping on defective items\n• Refunds processed within 7-10 business days\n\nWant to start a return?"),
    ("Refund policy", "Refund Policy:\n• Refunds issued to original payment method\n• Processing time: 7-10 business days\n• You'll receive email confirmation\n• Store credit option available for faster processing\n\nNeed to request a refund?"),
    ("Can I exchange a product", "Yes! Exchanges are easy:\n1. Initiate return for the item\n2. Select 'Exchange' option\n3. Choose replacement product\n4. We'll ship the new item once we receive the return\n\nWant to start an exchange?"),

    // Payments
    ("What payment methods do you accept", "We accept multiple payment options:\n\n• Credit/Debit Cards (Visa, Mastercard, Amex, Discover)\n• UPI (Google Pay, PhonePe, Paytm)\n• Net Banking\n• Digital Wallets (PayPal, Apple Pay)\n• Cash on Delivery (COD)\n\nAll transactions are secured with 256-bit encryption."),
    ("Do you accept credit cards", "Absolutely! We accept all major credit cards:\n• Visa\n• Mastercard\n• American Express\n• Discover\n\nYour payment information is always secure with us."),
    ("Payment options available", "Multiple payment options for your convenience:\n• Cards (Credit/Debit)\n• UPI payments\n• Net Banking\n• Digital Wallets\n• Cash on Delivery\n\nAll payments are 100% secure!"),
    ("Is payment secure", "Yes, absolutely! Your security is our priority:\n• 256-bit SSL encryption\n• PCI DSS compliant\n• No card details stored on our servers\n• Secure payment gateway partners\n\nYou can shop with confidence!"),

    // Shipping
    ("What are the shipping charges", "Shipping Charges:\n• FREE shipping on orders above $50\n• Standard shipping: $5 (3-5 business days)\n• Express shipping: $15 (1-2 business days)\n• International: Calculated at checkout\n\nCharges vary by location and weight."),
    ("Free shipping", "Yes! We offer FREE shipping on all orders above $50. For orders below $50:\n• Standard: $5\n• Express: $15\n\nAdd items to reach $50 and enjoy free delivery!"),
    ("How long does shipping take", "Shipping Timeframes:\n• Standard: 3-5 business days\n• Express: 1-2 business days\n• International: 7-14 business days\n\nYou'll receive tracking information via email once your order ships!"),

    // Cancellation
    ("How to cancel my order", "To cancel your order:\n\n1. Log into your account\n2. Go to 'My Orders'\n3. Find the order\n4. Click 'Cancel Order'\n\n Note: Orders can only be cancelled before shipping. Once shipped, you'll need to use our return process. What's your order number?"),
    ("Cancel order", "I can help you cancel your order! Here's how:\n• Visit 'My Orders' section\n• Select the order to cancel\n• Click 'Cancel Order' button\n\nRemember: Cancellation only works before the item ships. Need immediate help? Share your order number."),
    ("Stop my order", "To stop your order, you need to cancel it quickly before it ships:\n1. Go to 'My Orders'\n2. Click 'Cancel Order'\n\nIf already shipped, you can refuse delivery or initiate a return. What's your order status?"),

    // Products
    ("Tell me about your products", "We offer a wide range of products!\n\nFor detailed information:\n• Visit product pages for specifications\n• Check customer reviews and ratings\n• View images and videos\n• Compare similar products\n\nWhat category interests you?"),
    ("Product details", "Looking for product details? I can help!\n\nYou can find:\n• Full specifications\n• Customer reviews\n• High-quality images\n• Video demonstrations\n• Size guides and comparisons\n\nWhich product would you like to know about?"),
    ("Do you have product reviews", "Yes! Every product has customer reviews:\n• Verified purchase reviews\n• Star ratings\n• Photos from customers\n• Helpful vote system\n\nReviews help you make informed decisions. What product are you interested in?"),

    // Contact
    ("How can I contact support", "Multiple ways to reach us:\n\n• Phone: +1-800-555-0100 (24/7)\n• Email: support@example.com\n• Live Chat: Available on website\n• Social Media: @customersupport\n\nResponse time: Within 24 hours\n\nWould you like me to connect you with a human agent?"),
    ("Talk to a human", "I'll connect you with our human support team!\n\n• Phone: +1-800-555-0100 (immediate)\n• Live Chat: Click chat icon (2-3 min wait)\n• Email: support@example.com (24h response)\n\nWhat's the best way to reach you?"),
    ("Customer service number", "Our customer service:\n• Phone: 1-800-555-0100\n• Available 24/7\n• Average wait time: 3-5 minutes\n\nYou can also use live chat on our website for instant help!"),

    // Account
    ("I forgot my password", "No worries! Reset your password:\n\n1. Click 'Forgot Password' on login page\n2. Enter your email\n3. Check email for reset link\n4. Create new password\n\nNot receiving the email? Check spam folder or contact support."),
    ("How do I create an account", "Creating an account is easy:\n\n1. Click 'Sign Up'\n2. Enter email and password\n3. Verify email\n4. Complete profile\n\nBenefits: Order tracking, faster checkout, exclusive deals!"),
    ("Update my account information", "To update your account:\n\n1. Log in to your account\n2. Go to 'Account Settings'\n3. Edit information (name, email, address)\n4. Click 'Save Changes'\n\nNeed help with specific details?"),

    // Promotions
    ("Do you have any discounts", "Yes! Current offers:\n• Sign up: 10% off first order\n• Newsletter: Exclusive deals\n• Seasonal sales: Up to 50% off\n\nCheck our 'Deals' section for latest promotions. Want to subscribe for updates?"),
    ("Current sales", "Ongoing Sales:\n• Weekly deals section\n• Flash sales (limited time)\n• Clearance items up to 70% off\n\nVisit our homepage for today's featured deals!"),
    ("Coupon codes", "Coupon codes:\n• First-time users: WELCOME10 (10% off)\n• Newsletter subscribers get exclusive codes\n• Check email for personalized offers\n\nApply codes at checkout. Happy shopping!"),

    // Delivery issues
    ("My order is late", "Sorry your order is delayed! Let me help:\n\n1. Check tracking for latest update\n2. Delays can occur due to weather/holidays\n3. If beyond estimated date, contact support\n\nWhat's your order number? I'll look into it."),
    ("Package damaged", "Sorry about the damaged package!\n\n1. Take photos of damage\n2. Go to 'My Orders'\n3. Report issue with photos\n4. We'll arrange replacement/refund\n\nWe'll resolve this quickly for you!"),
    ("Wrong item received", "Apologies for the mix-up!\n\n1. Don't open/use the item\n2. Go to 'My Orders'\n3. Select 'Wrong Item Received'\n4. We'll send correct item + return label\n\nNo charge for our mistake!"),
];

/// The compiled-in catalog as a [`Corpus`].
pub fn builtin_corpus() -> Corpus {
    Corpus::from_pairs(BUILTIN_CATALOG)
}

#[derive(Deserialize)]
struct TomlCatalog {
    #[serde(default)]
    entries: Vec<CatalogEntry>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonCatalog {
    Bare(Vec<CatalogEntry>),
    Wrapped { entries: Vec<CatalogEntry> },
}

/// Load a catalog file, choosing the parser by extension.
///
/// An empty file yields an empty corpus; rejecting it is left to the
/// engine build so the caller sees the usual empty-corpus error.
pub fn load_catalog_file(path: &Path) -> Result<Corpus> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog file: {}", path.display()))?;

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    let entries = match ext.as_deref() {
        Some("toml") => parse_toml_catalog(&content),
        Some("json") => parse_json_catalog(&content),
        _ => bail!(
            "Unsupported catalog format: {}. Use a .toml or .json file.",
            path.display()
        ),
    }
    .with_context(|| format!("Failed to parse catalog file: {}", path.display()))?;

    validate_entries(&entries)?;
    Ok(Corpus::new(entries))
}

fn parse_toml_catalog(content: &str) -> Result<Vec<CatalogEntry>> {
    let parsed: TomlCatalog = toml::from_str(content)?;
    Ok(parsed.entries)
}

fn parse_json_catalog(content: &str) -> Result<Vec<CatalogEntry>> {
    let parsed: JsonCatalog = serde_json::from_str(content)?;
    Ok(match parsed {
        JsonCatalog::Bare(entries) | JsonCatalog::Wrapped { entries } => entries,
    })
}

fn validate_entries(entries: &[CatalogEntry]) -> Result<()> {
    for (i, entry) in entries.iter().enumerate() {
        if entry.question.trim().is_empty() {
            bail!("catalog entry {} has an empty question", i);
        }
    }
    Ok(())
}

/// Resolve the catalog selected by `config`.
pub fn load_corpus(config: &Config) -> Result<Corpus> {
    match &config.catalog.path {
        Some(path) => load_catalog_file(path),
        None => Ok(builtin_corpus()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_builtin_catalog_shape() {
        let corpus = builtin_corpus();
        assert_eq!(corpus.len(), 37);
        assert_eq!(corpus.question_at(0), Some("Hello"));
        assert!(corpus.questions().all(|q| !q.trim().is_empty()));
        assert!(corpus.answers().all(|a| !a.trim().is_empty()));
    }

    #[test]
    fn test_builtin_questions_unique() {
        let mut questions: Vec<String> =
            builtin_corpus().questions().map(str::to_lowercase).collect();
        let total = questions.len();
        questions.sort();
        questions.dedup();
        assert_eq!(questions.len(), total);
    }

    #[test]
    fn test_load_toml_catalog() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("faq.toml");
        fs::write(
            &path,
            "[[entries]]\nquestion = \"Coupon codes\"\nanswer = \"Use WELCOME10.\"\n\n\
             [[entries]]\nquestion = \"Current sales\"\nanswer = \"See Deals.\"\n",
        )
        .unwrap();
        let corpus = load_catalog_file(&path).unwrap();
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.answer_at(1), Some("See Deals."));
    }

    #[test]
    fn test_load_json_bare_and_wrapped() {
        let tmp = TempDir::new().unwrap();
        let bare = tmp.path().join("bare.json");
        fs::write(&bare, r#"[{"question": "Hi", "answer": "Hello!"}]"#).unwrap();
        let wrapped = tmp.path().join("wrapped.JSON");
        fs::write(
            &wrapped,
            r#"{"entries": [{"question": "Hi", "answer": "Hello!"}]}"#,
        )
        .unwrap();
        assert_eq!(load_catalog_file(&bare).unwrap(), load_catalog_file(&wrapped).unwrap());
    }

    #[test]
    fn test_empty_toml_catalog_is_empty_corpus() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("empty.toml");
        fs::write(&path, "").unwrap();
        assert!(load_catalog_file(&path).unwrap().is_empty());
    }

    #[test]
    fn test_blank_question_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bad.json");
        fs::write(
            &path,
            r#"[{"question": "Hi", "answer": "a"}, {"question": " ", "answer": "b"}]"#,
        )
        .unwrap();
        let err = load_catalog_file(&path).unwrap_err();
        assert!(err.to_string().contains("entry 1"));
    }

    #[test]
    fn test_unknown_extension_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("faq.yaml");
        fs::write(&path, "").unwrap();
        assert!(load_catalog_file(&path).is_err());
    }

    #[test]
    fn test_load_corpus_defaults_to_builtin() {
        let corpus = load_corpus(&Config::default()).unwrap();
        assert_eq!(corpus.fingerprint(), builtin_corpus().fingerprint());
    }
}
