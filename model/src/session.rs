use std::rc::Rc;

use anyhow::Result;

use dataset::{StopDirectory, StopPayload};

use crate::{
    Dialog, FragmentRouter, LocationFragment, Resolution, RouteAction, Selection, SelectionState,
    Ticket,
};

/// Something the viewer has to carry out on behalf of the session.
#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    /// Start loading a stop, then hand the result to `Session::resolve`.
    Fetch(Ticket),
    Open(Dialog),
    CloseDialogs,
}

/// Owns the selection and keeps the URL fragment in sync with it. The selection is the source
/// of truth; the fragment is written from it, and changes to it are treated as requests.
pub struct Session {
    selection: SelectionState,
    router: FragmentRouter,
    location: Box<dyn LocationFragment>,
    directory: Option<Rc<StopDirectory>>,
    dialog: Option<Dialog>,
}

impl Session {
    pub fn new(location: Box<dyn LocationFragment>) -> Self {
        Self {
            selection: SelectionState::new(),
            router: FragmentRouter::new(),
            location,
            directory: None,
            dialog: None,
        }
    }

    pub fn selection(&self) -> &Selection {
        self.selection.current()
    }

    pub fn stop(&self) -> Option<&Rc<StopPayload>> {
        self.selection.stop()
    }

    pub fn is_loading(&self) -> bool {
        self.selection.is_loading()
    }

    pub fn directory(&self) -> Option<&Rc<StopDirectory>> {
        self.directory.as_ref()
    }

    pub fn fragment(&self) -> String {
        self.location.read()
    }

    pub fn directory_loaded(&mut self, result: Result<StopDirectory>) -> Vec<Command> {
        match result {
            Ok(directory) => {
                let directory = Rc::new(directory);
                self.directory = Some(directory.clone());
                // The fragment might have changed before anybody polled it
                let mut commands = self.poll_fragment();
                if let Some(action) = self.router.directory_loaded(&directory) {
                    commands.extend(self.act(action));
                }
                commands
            }
            Err(err) => {
                // Searching won't work, but nothing else is affected
                error!("Couldn't load the stop directory: {err:#}");
                Vec::new()
            }
        }
    }

    /// Looks for navigation, like the user editing the fragment or pressing back.
    pub fn poll_fragment(&mut self) -> Vec<Command> {
        let directory = self.directory.clone();
        match self.router.poll(self.location.as_ref(), directory.as_deref()) {
            Some(action) => self.act(action),
            None => Vec::new(),
        }
    }

    pub fn select_stop(&mut self, stop_name: &str) -> Option<Command> {
        self.selection.select_stop(stop_name).map(Command::Fetch)
    }

    /// Hands over a finished fetch. Stale results are dropped.
    pub fn resolve(&mut self, ticket: Ticket, result: Result<StopPayload>) -> Resolution {
        let resolution = self.selection.resolve(ticket, result);
        if let Resolution::Available(ref effect) = resolution {
            if self.dialog.is_none() {
                self.router.apply(self.location.as_mut(), effect.clone());
            }
        }
        resolution
    }

    pub fn clear_selection(&mut self) {
        let effect = self.selection.clear_selection();
        if self.dialog.is_none() {
            self.router.apply(self.location.as_mut(), effect);
        }
    }

    pub fn open_dialog(&mut self, dialog: Dialog) {
        self.dialog = Some(dialog);
        self.router.write(self.location.as_mut(), dialog.token());
    }

    /// Restores the fragment for whatever is selected underneath the dialog.
    pub fn dialog_closed(&mut self) {
        self.dialog = None;
        match self.selection.fragment() {
            Some(effect) => self.router.apply(self.location.as_mut(), effect),
            None => self.router.write(self.location.as_mut(), ""),
        }
    }

    fn act(&mut self, action: RouteAction) -> Vec<Command> {
        match action {
            RouteAction::Select(name) => self.select_stop(&name).into_iter().collect(),
            RouteAction::Open(dialog) => {
                self.dialog = Some(dialog);
                vec![Command::Open(dialog)]
            }
            RouteAction::CloseDialogs => {
                if self.dialog.is_some() {
                    vec![Command::CloseDialogs]
                } else {
                    Vec::new()
                }
            }
        }
    }
}
