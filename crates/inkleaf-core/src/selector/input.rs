impl<C, P, R> PoemSelector<C, P, R>
where
    C: PoemCatalog,
    P: Presenter,
    R: RngCore,
{
    /// Drain every pending event from `input`.
    pub fn process_inputs<IN: InputProvider>(&mut self, input: &mut IN, now_ms: u64) {
        loop {
            match input.poll_event() {
                Ok(Some(event)) => self.apply_input_event(event, now_ms),
                Ok(None) => break,
                Err(_) => {
                    warn!("selector: input provider failed, dropping remaining events");
                    break;
                }
            }
        }
    }

    pub fn apply_input_event(&mut self, event: InputEvent, now_ms: u64) {
        match event {
            InputEvent::Activate { index, source } => self.apply_activation(index, source, now_ms),
            InputEvent::Previous => {
                let _ = self.previous(now_ms);
            }
            InputEvent::Next => {
                let _ = self.next(now_ms);
            }
            InputEvent::Random => {
                let _ = self.random(now_ms);
            }
            InputEvent::Swipe(direction) => self.apply_swipe(direction, now_ms),
        }
    }

    fn apply_activation(&mut self, index: u16, source: ActivationSource, now_ms: u64) {
        let slot = index as usize;

        match source {
            ActivationSource::Touch => {
                if let Some(mark) = self.touched_at.get_mut(slot) {
                    *mark = Some(now_ms);
                }
            }
            ActivationSource::Pointer => {
                let ghost = self
                    .touched_at
                    .get_mut(slot)
                    .and_then(|mark| mark.take())
                    .is_some_and(|at| now_ms.saturating_sub(at) < self.config.touch_dedup_ms as u64);
                if ghost {
                    debug!("selector: ignoring click on {} that follows a touch", index);
                    return;
                }
            }
            ActivationSource::Keyboard => {}
        }

        let _ = self.select_poem(i32::from(index), now_ms);
    }

    fn apply_swipe(&mut self, direction: SwipeDirection, now_ms: u64) {
        // Swipe only ever moves relative to an existing selection.
        if self.current.is_none() || !self.viewport.is_narrow() {
            return;
        }

        let _ = match direction {
            SwipeDirection::Left => self.next(now_ms),
            SwipeDirection::Right => self.previous(now_ms),
        };
    }
}
