// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::token::Token;
use std::collections::HashMap;
use std::sync::Mutex;

/// Persistence for tokens, keyed by account name.
///
/// Whatever constructs a [TokenProvider] can load a previously stored token
/// and seed the provider with it, skipping the first exchange while the
/// token remains valid. The persistence mechanism is up to the
/// implementation; this crate only ships the in-memory one.
///
/// [TokenProvider]: crate::token::TokenProvider
pub trait TokenStore: Send + Sync {
    /// Returns the token stored under `name`, if any.
    fn load(&self, name: &str) -> Option<Token>;

    /// Stores `token` under `name`, replacing any previous value.
    fn store(&self, name: &str, token: &Token);
}

/// A [TokenStore] holding tokens in process memory.
#[derive(Debug, Default)]
pub struct InMemoryTokenStore {
    entries: Mutex<HashMap<String, Token>>,
}

impl InMemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for InMemoryTokenStore {
    fn load(&self, name: &str) -> Option<Token> {
        self.entries
            .lock()
            .expect("token store lock is poisoned")
            .get(name)
            .cloned()
    }

    fn store(&self, name: &str, token: &Token) {
        self.entries
            .lock()
            .expect("token store lock is poisoned")
            .insert(name.to_string(), token.clone());
    }
}
