use log::info;
use realexpr::expressions::assignment::Assignment;
use realexpr::expressions::expr_tree::{Expr, Expression, UnaryOperator, Variable};
use realexpr::{product, sum};
use simplelog::{ColorChoice, CombinedLogger, Config, LevelFilter, TermLogger, TerminalMode};
use std::sync::Arc;

#[derive(Debug)]
struct Sine;

impl UnaryOperator for Sine {
    fn name(&self) -> &str {
        "sin"
    }
    fn apply(&self, x: f64) -> f64 {
        x.sin()
    }
    fn outer_derivative(&self, child: &Expr) -> Expr {
        Expr::unary(Arc::new(Cosine), child.clone())
    }
}

#[derive(Debug)]
struct Cosine;

impl UnaryOperator for Cosine {
    fn name(&self) -> &str {
        "cos"
    }
    fn apply(&self, x: f64) -> f64 {
        x.cos()
    }
    fn outer_derivative(&self, child: &Expr) -> Expr {
        -Expr::unary(Arc::new(Sine), child.clone())
    }
}

fn main() {
    let _ = CombinedLogger::init(vec![TermLogger::new(
        LevelFilter::Debug,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
    info!("realexpr demo started");

    let example = 1;
    match example {
        0 => {
            // BUILD, INSPECT, EVALUATE
            let vars = Variable::symbols("x, y");
            let (x, y) = (&vars[0], &vars[1]);
            // f = x*y + x, assembled bottom-up
            let f = sum!(
                product!(Expr::from(x.clone()), Expr::from(y.clone())),
                Expr::from(x.clone()),
            );
            println!("f = {}", f);
            println!("free variables: {:?}", f.variables());

            let mut assignment = Assignment::new();
            assignment.insert(x.clone(), 2.0);
            assignment.insert(y.clone(), 3.0);
            match f.eval(&assignment) {
                Ok(value) => println!("f(2, 3) = {}", value),
                Err(e) => println!("evaluation failed: {}", e),
            }
            // missing binding surfaces as an error, not a default
            assignment.remove(y);
            if let Err(e) = f.eval(&assignment) {
                println!("after removing y: {}", e);
            }
        }
        1 => {
            // DIFFERENTIATION
            let vars = Variable::symbols("x, y");
            let (x, y) = (&vars[0], &vars[1]);
            let f = sum!(
                product!(Expr::from(x.clone()), Expr::from(y.clone())),
                Expr::from(x.clone()),
            );
            let df_dx = f.diff(x);
            let df_dy = f.diff(y);
            println!("f = {}", f);
            println!("df/dx = {}", df_dx);
            println!("df/dy = {}", df_dy);

            let assignment: Assignment =
                vars.iter().cloned().zip([2.0, 3.0]).collect();
            println!("df/dx(2, 3) = {}", df_dx.eval(&assignment).unwrap());

            // derivatives are expressions too: differentiate again
            let second = df_dx.diff(y);
            println!("d2f/dxdy = {} = {}", second, second.eval(&assignment).unwrap());
        }
        2 => {
            // UNARY OPERATORS AND THE CHAIN RULE
            let x = Variable::new("x");
            let f = Expr::unary(
                Arc::new(Sine),
                Expr::from(x.clone()) * Expr::from(x.clone()),
            );
            println!("f = {}", f);
            let df_dx = f.diff(&x);
            println!("df/dx = {}", df_dx);
            let assignment: Assignment = [(x.clone(), 0.7)].into_iter().collect();
            println!("df/dx(0.7) = {}", df_dx.eval(&assignment).unwrap());
        }
        _ => println!("unknown example {}", example),
    }
    info!("realexpr demo ended");
}
