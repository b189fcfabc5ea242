impl<C, P, R> PoemSelector<C, P, R>
where
    C: PoemCatalog,
    P: Presenter,
    R: RngCore,
{
    /// Run every deferred effect that is due at `now_ms`.
    pub fn tick(&mut self, now_ms: u64) -> TickResult {
        let mut applied = TickResult::Idle;

        while let Some(position) = self.deferred.iter().position(|d| d.due_ms <= now_ms) {
            let due = self.deferred.swap_remove(position);
            self.run_effect(due.effect);
            applied = TickResult::Applied;
        }

        applied
    }

    /// Earliest timestamp at which [`Self::tick`] has work to do.
    pub fn next_deadline(&self) -> Option<u64> {
        self.deferred.iter().map(|d| d.due_ms).min()
    }

    fn schedule(&mut self, effect: Effect, due_ms: u64) {
        let entry = Deferred { due_ms, effect };

        if let Some(slot) = self.deferred.iter_mut().find(|d| d.effect.same_slot(effect)) {
            *slot = entry;
            return;
        }

        if let Err(entry) = self.deferred.push(entry) {
            warn!("selector: deferred queue full, running {:?} now", entry.effect);
            self.run_effect(entry.effect);
        }
    }

    fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::RevealContent { index } => {
                let Some(entry) = self.catalog.poem_at(index) else {
                    return;
                };
                match self.presenter.reveal_content(&entry) {
                    Ok(()) => {
                        debug!("selector: displayed {}", entry.id);
                        self.announce_selection(index);
                    }
                    Err(err) => error!("selector: could not display {:?}: {:?}", entry.id, err),
                }
            }
            Effect::ScrollReader => {
                if !self.viewport.is_narrow() {
                    debug!("selector: layout widened, reader scroll dropped");
                    return;
                }
                if let Err(err) = self.presenter.scroll_reader_into_view() {
                    warn!("selector: scroll to reader skipped: {:?}", err);
                }
            }
            Effect::ClearAccent => self.presenter.set_accent(false),
        }
    }
}
