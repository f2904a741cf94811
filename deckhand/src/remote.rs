//! Blocking facade over the async studio client.
//!
//! The event loop is synchronous; this wrapper owns a tokio runtime and
//! drives the client's futures to completion on demand.

use deckhand_core::{
    Conversation, GenerationRecord, Result, SourceDocument, StudioClient, Workflow,
};

/// Synchronous handle to the studio service.
pub struct Remote {
    runtime: tokio::runtime::Runtime,
    client: StudioClient,
}

impl Remote {
    pub fn new(client: StudioClient) -> std::io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        Ok(Self { runtime, client })
    }

    pub fn conversations(&self) -> Result<Vec<Conversation>> {
        self.runtime.block_on(self.client.list_conversations())
    }

    pub fn generations(&self) -> Result<Vec<GenerationRecord>> {
        self.runtime.block_on(self.client.list_generations())
    }

    pub fn documents(&self) -> Result<Vec<SourceDocument>> {
        self.runtime.block_on(self.client.list_documents())
    }

    pub fn current_workflow(&self) -> Result<Option<Workflow>> {
        self.runtime.block_on(self.client.current_workflow())
    }

    pub fn create_conversation(&self) -> Result<Conversation> {
        self.runtime.block_on(self.client.create_conversation())
    }

    pub fn delete_conversation(&self, id: &str) -> Result<bool> {
        self.runtime.block_on(self.client.delete_conversation(id))
    }

    pub fn select_document(&self, name: &str) -> Result<()> {
        self.runtime.block_on(self.client.select_document(name))
    }

    pub fn health_check(&self) -> Result<bool> {
        self.runtime.block_on(self.client.health_check())
    }
}
