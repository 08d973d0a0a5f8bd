//! The post form component: form state plus an injected mutation.
//!
//! # Design
//! `PostForm` owns the `FormState` and reads the request phase from its
//! `MutationController`; it never touches the network. The submit control's
//! disabled state is derived from the phase, so a pending request is the
//! only thing that blocks a second submit.

use tracing::debug;

use crate::error::FormError;
use crate::form::{FormField, FormState};
use crate::mutation::{MutationController, Phase};
use crate::render::render_post_form;
use crate::types::Post;

pub struct PostForm<M> {
    form: FormState,
    mutation: M,
}

impl<M> PostForm<M>
where
    M: MutationController<Payload = FormState, Data = Post>,
{
    pub fn new(mutation: M) -> Self {
        Self {
            form: FormState::default(),
            mutation,
        }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn mutation(&self) -> &M {
        &self.mutation
    }

    /// Mutable access for the host that settles the request.
    pub fn mutation_mut(&mut self) -> &mut M {
        &mut self.mutation
    }

    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        self.form.set_field(field, value);
    }

    pub fn set_field_by_name(&mut self, name: &str, value: impl Into<String>) -> Result<(), FormError> {
        self.form.set_field_by_name(name, value)
    }

    pub fn phase(&self) -> Phase {
        self.mutation.phase()
    }

    pub fn is_submit_disabled(&self) -> bool {
        self.phase() == Phase::Pending
    }

    /// Trigger the mutation with a snapshot of the form. Returns `false`
    /// without side effects while a request is pending.
    pub fn submit(&mut self) -> bool {
        if self.is_submit_disabled() {
            debug!("submit ignored while pending");
            return false;
        }
        self.mutation.trigger(self.form.clone());
        true
    }

    pub fn render(&self) -> String {
        render_post_form(&self.form, self.phase(), self.mutation.data())
    }
}
