//! Element lookup by id
//!
//! The application under test addresses every interactive element by a
//! stable `id` attribute, so the lookup contract here is attribute
//! equality, not general CSS matching. The only structural selectors in
//! the suite target the contact table rows, which carry a class instead.

/// Attribute-equality selector for an element whose `id` is exactly `id`
pub fn by_id(id: &str) -> String {
    format!("[id=\"{id}\"]")
}

/// Ids on the landing / login page
pub mod login {
    pub const INPUT_EMAIL: &str = "email";
    pub const INPUT_PASSWORD: &str = "password";
    pub const SUBMIT_BUTTON: &str = "submit";
    pub const SIGNUP_BUTTON: &str = "signup";
    pub const ERROR_MESSAGE: &str = "error";
}

/// Ids on the sign-up form (`/addUser`)
pub mod signup {
    pub const INPUT_FIRSTNAME: &str = "firstName";
    pub const INPUT_LASTNAME: &str = "lastName";
    pub const INPUT_EMAIL: &str = "email";
    pub const INPUT_PASSWORD: &str = "password";
    pub const SUBMIT_BUTTON: &str = "submit";
    pub const ERROR_MESSAGE: &str = "error";
}

/// Ids on the contact list page (`/contactList`) and the add-contact form
pub mod contact_list {
    pub const ADD_NEW_CONTACT_BUTTON: &str = "add-contact";
    pub const TABLE: &str = "myTable";
    pub const INPUT_FIRSTNAME: &str = "firstName";
    pub const INPUT_LASTNAME: &str = "lastName";
    pub const INPUT_BIRTHDATE: &str = "birthdate";
    pub const INPUT_EMAIL: &str = "email";
    pub const INPUT_PHONE: &str = "phone";
    pub const INPUT_ADDRESS_1: &str = "street1";
    pub const INPUT_ADDRESS_2: &str = "street2";
    pub const INPUT_CITY: &str = "city";
    pub const INPUT_STATE: &str = "stateProvince";
    pub const INPUT_POSTAL_CODE: &str = "postalCode";
    pub const INPUT_COUNTRY: &str = "country";
    pub const SUBMIT_BUTTON: &str = "submit";
    pub const ERROR_MESSAGE: &str = "error";

    /// Structural selector for the body rows of the contact table
    pub const ROW_SELECTOR: &str = "#myTable .contactTableBodyRow";
}

/// Ids on the contact details / edit pages
pub mod contact_details {
    pub const EDIT_CONTACT_BUTTON: &str = "edit-contact";
    pub const DELETE_CONTACT_BUTTON: &str = "delete";
    pub const RETURN_BUTTON: &str = "return";
}

/// Every element id the application exposes, across all pages.
///
/// Scenario files carry raw id strings, so this is the vocabulary they
/// are validated against.
pub const fn known_ids() -> &'static [&'static str] {
    &[
        login::INPUT_EMAIL,
        login::INPUT_PASSWORD,
        login::SUBMIT_BUTTON,
        login::SIGNUP_BUTTON,
        login::ERROR_MESSAGE,
        signup::INPUT_FIRSTNAME,
        signup::INPUT_LASTNAME,
        contact_list::ADD_NEW_CONTACT_BUTTON,
        contact_list::TABLE,
        contact_list::INPUT_BIRTHDATE,
        contact_list::INPUT_PHONE,
        contact_list::INPUT_ADDRESS_1,
        contact_list::INPUT_ADDRESS_2,
        contact_list::INPUT_CITY,
        contact_list::INPUT_STATE,
        contact_list::INPUT_POSTAL_CODE,
        contact_list::INPUT_COUNTRY,
        contact_details::EDIT_CONTACT_BUTTON,
        contact_details::DELETE_CONTACT_BUTTON,
        contact_details::RETURN_BUTTON,
    ]
}
