//! Signing up and signing in: creating the login, the payments-network
//! customer and the stored user record, then starting a session.

use crate::{
    Error,
    account::{User, UserId},
    id::extract_customer_id_from_url,
    logging::Redacted,
    validation::{AuthForm, AuthFormKind},
};

/// The personal details the payments network needs to create a customer.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCustomer {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// The customer's email address.
    pub email: String,
    /// First line of the street address.
    pub address1: String,
    /// City of the street address.
    pub city: String,
    /// Two letter US state code.
    pub state: String,
    /// US ZIP code.
    pub postal_code: String,
    /// In YYYY-MM-DD format.
    pub date_of_birth: Redacted<String>,
    /// Nine digits, no dashes.
    pub ssn: Redacted<String>,
}

impl NewCustomer {
    fn from_form(form: &AuthForm) -> Self {
        let field = |value: &Option<String>| value.clone().unwrap_or_default();

        Self {
            first_name: field(&form.first_name),
            last_name: field(&form.last_name),
            email: form.email.clone(),
            address1: field(&form.address1),
            city: field(&form.city),
            state: field(&form.state),
            postal_code: field(&form.postal_code),
            date_of_birth: Redacted(field(&form.date_of_birth)),
            ssn: Redacted(field(&form.ssn)),
        }
    }

    /// The name shown for the login, e.g. "Jane Doe".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// The auth backend, payments network and storage calls needed to register
/// and log in users.
pub trait Registrar {
    /// Create a login for `email`, returning the new user's ID.
    fn create_auth_user(&self, email: &str, password: &str, name: &str) -> Result<UserId, Error>;

    /// Create a customer on the payments network, returning the customer URL.
    fn create_customer(&self, customer: &NewCustomer) -> Result<String, Error>;

    /// Store the user record.
    fn save_user(&self, user: User) -> Result<User, Error>;

    /// Log in with `email` and `password`, returning the ID of the user the
    /// session belongs to.
    fn start_session(&self, email: &str, password: &str) -> Result<UserId, Error>;

    /// The stored user record for `user_id`.
    fn user(&self, user_id: &UserId) -> Result<User, Error>;
}

/// Register a new user from a sign-up form and log them in.
///
/// The steps run in order and the first failure aborts the sign-up. The user
/// record is only stored once the payments network has created a customer.
///
/// # Errors
///
/// Returns [Error::InvalidForm] if the form fails sign-up validation, in which
/// case `registrar` is not called. An empty customer URL is reported as an
/// [Error::Upstream]. Otherwise returns the first error reported by
/// `registrar`.
pub fn sign_up(registrar: &impl Registrar, form: &AuthForm) -> Result<User, Error> {
    form.validate(AuthFormKind::SignUp)?;

    let customer = NewCustomer::from_form(form);
    let user_id = registrar.create_auth_user(&form.email, &form.password, &customer.full_name())?;
    tracing::debug!("Created login for user {user_id}");

    let customer_url = registrar.create_customer(&customer)?;
    if customer_url.is_empty() {
        return Err(Error::upstream(
            "payments",
            "the payments network did not return a customer URL",
        ));
    }

    let user = User {
        id: user_id,
        email: customer.email,
        first_name: customer.first_name,
        last_name: customer.last_name,
        customer_id: extract_customer_id_from_url(&customer_url).to_owned(),
        customer_url,
    };
    let user = registrar.save_user(user)?;
    tracing::info!("Signed up user {} as customer {}", user.id, user.customer_id);

    registrar.start_session(&form.email, &form.password)?;

    Ok(user)
}

/// Log in with a sign-in form and load the user's record.
///
/// # Errors
///
/// Returns [Error::InvalidForm] if the form fails sign-in validation,
/// otherwise the first error reported by `registrar`.
pub fn sign_in(registrar: &impl Registrar, form: &AuthForm) -> Result<User, Error> {
    form.validate(AuthFormKind::SignIn)?;

    let user_id = registrar.start_session(&form.email, &form.password)?;
    tracing::info!("Signed in user {user_id}");

    registrar.user(&user_id)
}

#[cfg(test)]
mod tests {
    use super::{sign_in, sign_up};
    use crate::{
        Error,
        account::UserId,
        test_utils::{FakeRegistrar, user},
        validation::{AuthField, AuthForm},
    };

    fn sign_in_form() -> AuthForm {
        AuthForm {
            email: "jane@example.com".to_owned(),
            password: "correct horse".to_owned(),
            ..Default::default()
        }
    }

    fn sign_up_form() -> AuthForm {
        AuthForm {
            first_name: Some("Jane".to_owned()),
            last_name: Some("Doe".to_owned()),
            address1: Some("123 Main St".to_owned()),
            city: Some("New York".to_owned()),
            state: Some("NY".to_owned()),
            postal_code: Some("11101".to_owned()),
            date_of_birth: Some("1990-01-31".to_owned()),
            ssn: Some("123456789".to_owned()),
            ..sign_in_form()
        }
    }

    #[test]
    fn signs_up_and_stores_customer() {
        let registrar = FakeRegistrar::new();

        let signed_up = sign_up(&registrar, &sign_up_form()).unwrap();

        assert_eq!(signed_up, user());
        assert_eq!(registrar.saved_users(), vec![user()]);
        assert_eq!(registrar.sessions(), vec!["jane@example.com".to_owned()]);
    }

    #[test]
    fn names_login_after_user() {
        let registrar = FakeRegistrar::new();

        sign_up(&registrar, &sign_up_form()).unwrap();

        assert_eq!(
            registrar.auth_users(),
            vec![("jane@example.com".to_owned(), "Jane Doe".to_owned())]
        );
    }

    #[test]
    fn sends_personal_details_to_payments_network() {
        let registrar = FakeRegistrar::new();

        sign_up(&registrar, &sign_up_form()).unwrap();

        let customers = registrar.customers();
        assert_eq!(customers.len(), 1);
        assert_eq!(customers[0].postal_code, "11101");
        assert_eq!(customers[0].ssn.0, "123456789");
        assert!(!format!("{:?}", customers[0]).contains("123456789"));
    }

    #[test]
    fn invalid_form_makes_no_calls() {
        let registrar = FakeRegistrar::new();
        let form = AuthForm {
            postal_code: Some("1110".to_owned()),
            ..sign_up_form()
        };

        let result = sign_up(&registrar, &form);

        let Err(Error::InvalidForm(errors)) = result else {
            panic!("expected an invalid form error");
        };
        assert_eq!(
            errors.message_for(AuthField::PostalCode),
            Some("Invalid U.S. ZIP code")
        );
        assert!(registrar.auth_users().is_empty());
        assert!(registrar.customers().is_empty());
    }

    #[test]
    fn sign_in_form_cannot_sign_up() {
        let registrar = FakeRegistrar::new();

        let result = sign_up(&registrar, &sign_in_form());

        assert!(matches!(result, Err(Error::InvalidForm(_))));
        assert!(registrar.auth_users().is_empty());
    }

    #[test]
    fn does_not_store_user_without_customer_url() {
        let registrar = FakeRegistrar::new().without_customer_url();

        let result = sign_up(&registrar, &sign_up_form());

        assert!(matches!(
            result,
            Err(Error::Upstream {
                service: "payments",
                ..
            })
        ));
        assert!(registrar.saved_users().is_empty());
        assert!(registrar.sessions().is_empty());
    }

    #[test]
    fn stops_when_login_cannot_be_created() {
        let registrar = FakeRegistrar::new().fail_auth();

        let result = sign_up(&registrar, &sign_up_form());

        assert!(matches!(result, Err(Error::Upstream { service: "auth", .. })));
        assert!(registrar.customers().is_empty());
        assert!(registrar.saved_users().is_empty());
    }

    #[test]
    fn signs_in_and_loads_user() {
        let registrar = FakeRegistrar::new().with_user(user());

        let signed_in = sign_in(&registrar, &sign_in_form()).unwrap();

        assert_eq!(signed_in.id, UserId::new("user_1"));
        assert_eq!(registrar.sessions(), vec!["jane@example.com".to_owned()]);
    }

    #[test]
    fn sign_in_rejects_bad_credentials() {
        let registrar = FakeRegistrar::new().with_user(user()).fail_auth();

        let result = sign_in(&registrar, &sign_in_form());

        assert!(matches!(result, Err(Error::Upstream { service: "auth", .. })));
    }

    #[test]
    fn sign_in_validates_before_logging_in() {
        let registrar = FakeRegistrar::new().with_user(user());
        let form = AuthForm {
            password: "short".to_owned(),
            ..sign_in_form()
        };

        let result = sign_in(&registrar, &form);

        assert!(matches!(result, Err(Error::InvalidForm(_))));
        assert!(registrar.sessions().is_empty());
    }
}
