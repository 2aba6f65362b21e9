#[cfg(not(target_arch = "wasm32"))]
pub fn confirm_delete(table_name: &str) -> bool {
    use rfd::{MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};

    MessageDialog::new()
        .set_level(MessageLevel::Warning)
        .set_title("Delete table")
        .set_description(delete_prompt(table_name))
        .set_buttons(MessageButtons::YesNo)
        .show()
        == MessageDialogResult::Yes
}

#[cfg(target_arch = "wasm32")]
pub fn confirm_delete(table_name: &str) -> bool {
    web_sys::window()
        .and_then(|window| window.confirm_with_message(&delete_prompt(table_name)).ok())
        .unwrap_or(false)
}

pub fn delete_prompt(table_name: &str) -> String {
    format!("Are you sure you want to delete the table \"{table_name}\"? All of its rows are deleted too.")
}
